//! Wires the router onto the HTTP connection loop.
//!
//! [`Server`] is an [`mvc_http::handler::Handler`]: for every buffered request it
//! builds an [`IncomingRequest`], asks the [`Router`] for a route and invokes the
//! route's handler. Requests that match nothing go to the default handler, or get
//! `404 Not Found` when there is none.

use crate::body::ResponseBody;
use crate::error::{ServerBuildError, WebError};
use crate::handler::RequestHandler;
use crate::request::{IncomingRequest, PathParams, RequestContext};
use crate::responder::Responder;
use crate::router::Router;
use bytes::Bytes;
use http::{Request, Response};
use mvc_http::codec::DEFAULT_MAX_BODY_SIZE;
use mvc_http::connection::HttpConnection;
use mvc_http::handler::Handler;
use std::convert::Infallible;
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

pub struct ServerBuilder {
    router: Option<Router>,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Result<Vec<SocketAddr>, ServerBuildError>,
    max_body_size: u64,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, default_handler: None, address: resolve(DEFAULT_ADDRESS), max_body_size: DEFAULT_MAX_BODY_SIZE }
    }

    /// Defaults to `127.0.0.1:8080`; a bad address is reported by [`Self::build`].
    pub fn address<A: ToSocketAddrs + fmt::Display>(mut self, address: A) -> Self {
        self.address = resolve(address);
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    /// Upper bound for buffered request bodies, larger ones get `413 Payload Too Large`.
    pub fn max_body_size(mut self, max_body_size: u64) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address?;
        Ok(Server { router, default_handler: self.default_handler, address, max_body_size: self.max_body_size })
    }
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

fn resolve<A: ToSocketAddrs + fmt::Display>(address: A) -> Result<Vec<SocketAddr>, ServerBuildError> {
    address
        .to_socket_addrs()
        .map(|addrs| addrs.collect())
        .map_err(|source| ServerBuildError::InvalidAddress { address: address.to_string(), source })
}

pub struct Server {
    router: Router,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Vec<SocketAddr>,
    max_body_size: u64,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    /// Accepts connections until the listener fails to bind; each connection runs on its own task.
    pub async fn start(self) {
        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return;
            }
        };

        let max_body_size = self.max_body_size;
        let handler = Arc::new(self);
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                debug!(%remote_addr, "accept connection");
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::with_max_body_size(reader, writer, max_body_size);
                match connection.process(handler).await {
                    Ok(_) => {
                        info!("finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }

    /// Routes and answers one request.
    pub async fn dispatch(&self, request: Request<Bytes>) -> Response<ResponseBody> {
        let request = IncomingRequest::new(request);

        if let Some(route_match) = self.router.at(&request) {
            let item = route_match.item();
            let req_ctx = RequestContext::new(&request, Some(item), route_match.path_params());
            return item.handler().invoke(&req_ctx).await;
        }

        debug!(method = %request.method(), path = request.path(), "no route matched");
        let path_params = PathParams::empty();
        let req_ctx = RequestContext::new(&request, None, &path_params);
        match &self.default_handler {
            Some(handler) => handler.invoke(&req_ctx).await,
            None => WebError::route_not_found(request.method().clone(), request.path()).response_to(&req_ctx),
        }
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

impl Handler for Server {
    type RespBody = ResponseBody;
    type Error = Infallible;

    fn call(&self, req: Request<Bytes>) -> impl Future<Output = Result<Response<Self::RespBody>, Self::Error>> + Send {
        async move { Ok(self.dispatch(req).await) }
    }
}
