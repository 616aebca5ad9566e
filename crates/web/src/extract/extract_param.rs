//! Parameter-based extraction: raw maps, path variables, declared parameters and
//! model attributes.

use crate::binder::{BoundValues, bind, bind_record};
use crate::error::WebError;
use crate::extract::ModelAttribute;
use crate::extract::from_request::FromRequest;
use crate::record::Model;
use crate::request::{ParamMap, PathParams, RequestContext};

impl FromRequest for ParamMap {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.params().clone())
    }
}

impl FromRequest for PathParams {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.path_params().clone())
    }
}

/// Runs the binder over the parameters the matched route declared.
impl FromRequest for BoundValues {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(bind(req, req.param_specs())?)
    }
}

impl<T: Model> FromRequest for ModelAttribute<T> {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        let record = bind_record(req.params(), T::SHAPE)?;
        Ok(ModelAttribute(T::from_record(record)))
    }
}
