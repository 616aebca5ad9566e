//! Connection handling
//!
//! [`HttpConnection`] drives one client socket: it decodes buffered requests,
//! hands them to a [`crate::handler::Handler`] one at a time and writes each
//! response before reading the next request. Keep-alive follows the request's
//! version and `Connection` header.

mod http_connection;

pub use http_connection::HttpConnection;
