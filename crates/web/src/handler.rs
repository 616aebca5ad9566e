use crate::body::ResponseBody;
use crate::extract::FromRequest;
use crate::fn_trait::FnTrait;
use crate::request::RequestContext;
use crate::responder::Responder;
use async_trait::async_trait;
use http::Response;
use std::fmt;
use std::marker::PhantomData;
use tracing::warn;

/// Handles a routed request.
///
/// Failures are part of the response: a handler always answers.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_>) -> Response<ResponseBody>;
}

/// a `FnTrait` holder which represents any async Fn
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

impl<F, Args> fmt::Debug for FnHandler<F, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("f", &std::any::type_name::<F>()).finish()
    }
}

/// Wraps an async fn whose arguments are all [`FromRequest`] extractors.
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args>,
    F::Output: Responder,
    Args: FromRequest + Send,
{
    async fn invoke(&self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        let args = match Args::from_request(req) {
            Ok(args) => args,
            Err(e) => {
                warn!(method = %req.method(), path = req.uri().path(), cause = %e, "reject request before handler");
                return e.response_to(req);
            }
        };

        self.f.call(args).await.response_to(req)
    }
}
