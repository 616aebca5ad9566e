//! Decoder for bodies whose size is given by the `Content-Length` header,
//! see [RFC 9112 Section 6.3](https://www.rfc-editor.org/rfc/rfc9112.html#section-6.3).

use std::{cmp, mem};

use crate::protocol::ParseError;
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// Buffers exactly `Content-Length` bytes and yields them as one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes still to be read
    remaining: u64,
    buf: BytesMut,
}

impl LengthDecoder {
    pub fn new(length: u64) -> Self {
        // don't trust the announced length for the initial allocation
        let capacity = cmp::min(length, 64 * 1024) as usize;
        Self { remaining: length, buf: BytesMut::with_capacity(capacity) }
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.remaining > 0 && !src.is_empty() {
            let len = cmp::min(self.remaining, src.len() as u64) as usize;
            self.buf.extend_from_slice(&src.split_to(len));
            self.remaining -= len as u64;
        }

        if self.remaining == 0 { Ok(Some(mem::take(&mut self.buf).freeze())) } else { Ok(None) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_only_announced_bytes() {
        let mut buffer = BytesMut::from(&b"1012345678GET / HTTP/1.1\r\n"[..]);

        let mut length_decoder = LengthDecoder::new(10);
        let bytes = length_decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(&bytes[..], b"1012345678");
        assert_eq!(&buffer[..], b"GET / HTTP/1.1\r\n");
    }

    #[test]
    fn waits_for_split_body() {
        let mut length_decoder = LengthDecoder::new(8);

        let mut first = BytesMut::from(&b"user"[..]);
        assert!(length_decoder.decode(&mut first).unwrap().is_none());
        assert!(first.is_empty());

        let mut second = BytesMut::from(&b"name"[..]);
        let bytes = length_decoder.decode(&mut second).unwrap().unwrap();
        assert_eq!(&bytes[..], b"username");
    }
}
