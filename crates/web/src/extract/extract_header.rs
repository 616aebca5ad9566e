use crate::error::WebError;
use crate::extract::Locale;
use crate::extract::from_request::FromRequest;
use crate::request::{Cookies, RequestContext};
use http::{HeaderMap, Method, Uri, Version};

impl FromRequest for Method {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.method().clone())
    }
}

impl FromRequest for Uri {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.uri().clone())
    }
}

impl FromRequest for Version {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.request().version())
    }
}

impl FromRequest for HeaderMap {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.headers().clone())
    }
}

impl FromRequest for Cookies {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(req.cookies().clone())
    }
}

impl FromRequest for Locale {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(Locale::from_headers(req.headers()))
    }
}
