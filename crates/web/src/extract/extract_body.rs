use crate::error::WebError;
use crate::extract::from_request::FromRequest;
use crate::extract::{Json, RequestEntity};
use crate::payload::{decode_record, decode_string};
use crate::record::Model;
use crate::request::RequestContext;
use bytes::Bytes;

impl FromRequest for Bytes {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.body().clone())
    }
}

/// The body as text, exactly as received.
impl FromRequest for String {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(decode_string(req.body())?)
    }
}

impl<T: Model> FromRequest for Json<T> {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        let record = decode_record(req.body(), req.content_type(), T::SHAPE)?;
        Ok(Json(T::from_record(record)))
    }
}

impl<B: FromRequest> FromRequest for RequestEntity<B> {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(RequestEntity {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
            body: B::from_request(req)?,
        })
    }
}
