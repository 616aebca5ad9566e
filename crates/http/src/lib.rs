//! Buffered HTTP/1.1 connection plumbing
//!
//! This crate owns the wire side of the server: it reads raw bytes from a socket,
//! decodes them into [`http::Request<Bytes>`] values with the whole body already
//! buffered, hands each request to a [`handler::Handler`] and writes the
//! returned response back with an exact `Content-Length`.
//!
//! Request mapping, parameter binding and payload decoding live one layer up,
//! in `mvc-web`; nothing here knows about routes.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use http_body_util::Full;
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use mvc_http::connection::HttpConnection;
//! use mvc_http::handler::make_handler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             if let Err(e) = HttpConnection::new(reader, writer).process(handler).await {
//!                 error!("connection closed with error, cause {}", e);
//!             }
//!             info!("connection shutdown");
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request<Bytes>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     info!(path = request.uri().path(), body_size = request.body().len(), "receive request");
//!     Ok(Response::builder().status(StatusCode::OK).body(Full::new(Bytes::from_static(b"ok"))).unwrap())
//! }
//! ```
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only
//! - Request bodies are buffered in memory, bounded by a configurable limit
//! - Maximum header size: 8KB, maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
