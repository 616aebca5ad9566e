//! HTTP codec module for decoding requests and encoding responses
//!
//! - [`RequestDecoder`]: yields complete requests with buffered bodies
//!   (`Content-Length` or chunked framing)
//! - [`ResponseEncoder`]: writes a status line, headers with an exact
//!   `Content-Length`, and the body
//!
//! Both plug into `tokio_util::codec::{FramedRead, FramedWrite}`.

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::DEFAULT_MAX_BODY_SIZE;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
