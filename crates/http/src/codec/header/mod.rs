//! Request header decoding and response head encoding.
//!
//! - [`HeaderDecoder`]: request line and header fields to a [`RequestHeader`](crate::protocol::RequestHeader)
//!   plus the body framing ([`PayloadSize`](crate::protocol::PayloadSize))
//! - [`HeaderEncoder`]: status line and header fields of a response, with `Content-Length` fixed up

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
