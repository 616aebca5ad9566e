//! HTTP response head encoder.
//!
//! Writes the status line and header fields. The body is always fully buffered
//! by the time the head is written, so `Content-Length` is set from its exact size
//! and any `Transfer-Encoding` set by a handler is dropped.

use crate::protocol::SendError;

use bytes::{BufMut, BytesMut};

use http::response::Parts;
use http::{HeaderValue, Version, header};
use std::io;
use std::io::{ErrorKind, Write};
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder<(Parts, usize)> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (Parts, usize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut head, content_length) = item;

        dst.reserve(INIT_HEADER_SIZE);
        match head.version {
            // HTTP/1.0 clients are answered with an HTTP/1.1 status line, which they accept
            Version::HTTP_11 | Version::HTTP_10 => {
                write!(
                    FastWrite(dst),
                    "HTTP/1.1 {} {}\r\n",
                    head.status.as_str(),
                    head.status.canonical_reason().unwrap_or("Unknown")
                )?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(io::Error::from(ErrorKind::Unsupported).into());
            }
        }

        head.headers.remove(header::TRANSFER_ENCODING);
        head.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

        for (header_name, header_value) in &head.headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// `io::Write` over a `BytesMut` that has already reserved enough room.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
