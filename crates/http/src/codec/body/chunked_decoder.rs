//! Decoder for bodies sent with chunked transfer encoding,
//! see [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#section-7.1).
//!
//! Chunk extensions are ignored and trailer fields are discarded.

use std::mem;

use crate::ensure;
use crate::protocol::ParseError;
use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

/// Longest chunk-size line or trailer line accepted
const MAX_LINE_BYTES: usize = 4 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkState {
    /// Expecting a `chunk-size [; ext] CRLF` line
    Size,
    /// Reading chunk data, with the number of bytes left in this chunk
    Data(u64),
    /// Expecting the CRLF that ends a chunk's data
    DataEnd,
    /// After the last chunk; reading trailer lines until the empty one
    Trailer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkState,
    buf: BytesMut,
    max_body_size: u64,
}

impl ChunkedDecoder {
    pub fn new(max_body_size: u64) -> Self {
        Self { state: ChunkState::Size, buf: BytesMut::new(), max_body_size }
    }
}

impl Decoder for ChunkedDecoder {
    type Item = Bytes;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                ChunkState::Size => {
                    let Some(line) = take_line(src)? else {
                        return Ok(None);
                    };
                    let size = parse_chunk_size(&line)?;
                    trace!(chunk_size = size, "decode chunk size");

                    if size == 0 {
                        self.state = ChunkState::Trailer;
                    } else {
                        let total = (self.buf.len() as u64).saturating_add(size);
                        ensure!(total <= self.max_body_size, ParseError::too_large_body(total, self.max_body_size));
                        self.state = ChunkState::Data(size);
                    }
                }

                ChunkState::Data(remaining) => {
                    if src.is_empty() {
                        return Ok(None);
                    }
                    let len = remaining.min(src.len() as u64);
                    self.buf.extend_from_slice(&src.split_to(len as usize));
                    self.state = if remaining == len { ChunkState::DataEnd } else { ChunkState::Data(remaining - len) };
                }

                ChunkState::DataEnd => {
                    if src.len() < 2 {
                        return Ok(None);
                    }
                    ensure!(&src[..2] == b"\r\n", ParseError::invalid_body("chunk data must end with CRLF"));
                    src.advance(2);
                    self.state = ChunkState::Size;
                }

                ChunkState::Trailer => {
                    let Some(line) = take_line(src)? else {
                        return Ok(None);
                    };
                    if line.is_empty() {
                        self.state = ChunkState::Size;
                        return Ok(Some(mem::take(&mut self.buf).freeze()));
                    }
                }
            }
        }
    }
}

/// Splits off one CRLF-terminated line, without the CRLF.
fn take_line(src: &mut BytesMut) -> Result<Option<BytesMut>, ParseError> {
    match src.windows(2).position(|window| window == b"\r\n") {
        Some(end) => {
            let line = src.split_to(end);
            src.advance(2);
            Ok(Some(line))
        }
        None => {
            ensure!(src.len() <= MAX_LINE_BYTES, ParseError::invalid_body("chunk line too long"));
            Ok(None)
        }
    }
}

fn parse_chunk_size(line: &[u8]) -> Result<u64, ParseError> {
    let size = line.split(|b| *b == b';').next().unwrap_or_default().trim_ascii();
    let size = std::str::from_utf8(size).map_err(|_utf8_error| ParseError::invalid_body("chunk size is not ascii"))?;
    u64::from_str_radix(size, 16).map_err(|_parse_error| ParseError::invalid_body(format!("invalid chunk size '{size}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_whole_body() {
        let mut buffer = BytesMut::from(&b"5\r\nhello\r\n6; name=value\r\n world\r\n0\r\n\r\nGET"[..]);
        let mut decoder = ChunkedDecoder::new(1024);

        let body = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(&body[..], b"hello world");
        assert_eq!(&buffer[..], b"GET");
    }

    #[test]
    fn resumes_across_reads() {
        let mut decoder = ChunkedDecoder::new(1024);

        let mut first = BytesMut::from(&b"a\r\n{\"user"[..]);
        assert!(decoder.decode(&mut first).unwrap().is_none());

        let mut second = BytesMut::from(&b"\":1}\r\n0\r\nx-trailer: 1\r\n\r\n"[..]);
        let body = decoder.decode(&mut second).unwrap().unwrap();

        assert_eq!(&body[..], b"{\"user\":1}");
        assert!(second.is_empty());
    }

    #[test]
    fn rejects_bad_chunk_size() {
        let mut buffer = BytesMut::from(&b"zz\r\nhello\r\n"[..]);
        let result = ChunkedDecoder::new(1024).decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidBody { .. })));
    }

    #[test]
    fn enforces_body_limit() {
        let mut buffer = BytesMut::from(&b"10\r\n"[..]);
        let result = ChunkedDecoder::new(8).decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::TooLargeBody { current_size: 16, max_size: 8 })));
    }
}
