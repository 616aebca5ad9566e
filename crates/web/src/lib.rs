//! Annotation-free request mapping on top of `mvc-http`.
//!
//! Routes are declared with a path template plus optional method, parameter, header
//! and media type conditions. A matched request is handed to an async function whose
//! arguments are extracted from it: query/form parameters, path variables, headers,
//! cookies, a text or JSON body, or a whole model bound from parameters.
//!
//! # Example
//!
//! ```no_run
//! use mvc_web::router::{Router, Scope, get, post};
//! use mvc_web::{PathParams, Server, handler_fn};
//!
//! async fn user(path_params: PathParams) -> String {
//!     format!("get userId={}", path_params.get("userId").unwrap_or_default())
//! }
//!
//! async fn echo(body: String) -> String {
//!     body
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .route("/echo", post(handler_fn(echo)))
//!         .scope(Scope::new("/mapping/users").route("/{userId}", get(handler_fn(user))))
//!         .build()
//!         .expect("valid routes");
//!
//!     let server = Server::builder().router(router).address("127.0.0.1:8080").build().expect("valid server");
//!     server.start().await;
//! }
//! ```

mod body;
mod fn_trait;
mod handler;
mod request;
mod server;

pub mod binder;
pub mod error;
pub mod extract;
pub mod logging;
pub mod payload;
pub mod record;
pub mod responder;
pub mod router;

pub use binder::BoundValues;
pub use body::ResponseBody;
pub use error::{BindError, DecodeError, RouteError, ServerBuildError, WebError};
pub use fn_trait::FnTrait;
pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use request::{Cookies, IncomingRequest, ParamMap, PathParams, RequestContext};
pub use responder::Responder;
pub use router::Router;
pub use server::{Server, ServerBuilder};
