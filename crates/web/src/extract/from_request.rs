use crate::error::WebError;
use crate::request::RequestContext;

/// Builds a handler argument from the request.
///
/// Bodies are already buffered, so extraction never waits.
pub trait FromRequest: Sized {
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError>;
}

/// `None` instead of failing.
impl<T> FromRequest for Option<T>
where
    T: FromRequest,
{
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(T::from_request(req).ok())
    }
}

/// Hands the failure to the handler instead of answering it.
impl<T> FromRequest for Result<T, WebError>
where
    T: FromRequest,
{
    fn from_request(req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(T::from_request(req))
    }
}

impl FromRequest for () {
    fn from_request(_req: &RequestContext<'_>) -> Result<Self, WebError> {
        Ok(())
    }
}
