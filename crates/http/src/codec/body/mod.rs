//! Request body decoders.
//!
//! Both decoders buffer the whole body and yield it once complete:
//! - [`LengthDecoder`]: bodies framed by `Content-Length`
//! - [`ChunkedDecoder`]: bodies sent with chunked transfer encoding
//!
//! [`PayloadDecoder`] picks one of them from a [`PayloadSize`](crate::protocol::PayloadSize).

mod chunked_decoder;
mod length_decoder;
mod payload_decoder;

pub use payload_decoder::PayloadDecoder;
