//! The seam between the connection loop and the application.

use std::error::Error;
use std::fmt;

use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;

/// Turns one fully buffered request into a response.
///
/// Errors are answered with `500 Internal Server Error` by the connection; the
/// connection itself stays open.
pub trait Handler: Send + Sync {
    type RespBody: Body<Data = Bytes> + Send;
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn call(&self, req: Request<Bytes>) -> impl Future<Output = Result<Response<Self::RespBody>, Self::Error>> + Send;
}

/// A [`Handler`] backed by an async function, see [`make_handler`].
pub struct HandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

impl<RespBody, Err, F, Fut> Handler for HandlerFn<F>
where
    RespBody: Body<Data = Bytes> + Send,
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<Response<RespBody>, Err>> + Send,
{
    type RespBody = RespBody;
    type Error = Err;

    fn call(&self, req: Request<Bytes>) -> impl Future<Output = Result<Response<Self::RespBody>, Self::Error>> + Send {
        (self.f)(req)
    }
}

pub fn make_handler<F, RespBody, Err, Fut>(f: F) -> HandlerFn<F>
where
    RespBody: Body<Data = Bytes> + Send,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<Response<RespBody>, Err>> + Send,
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
{
    HandlerFn { f }
}
