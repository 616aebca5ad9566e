//! Picks the body decoder matching the framing announced by the request header.

use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::length_decoder::LengthDecoder;
use crate::ensure;
use crate::protocol::{ParseError, PayloadSize};
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Length(LengthDecoder),
    Chunked(ChunkedDecoder),
    NoBody,
}

impl PayloadDecoder {
    /// Builds the decoder for `payload_size`, refusing a `Content-Length` above `max_body_size` up front.
    pub fn new(payload_size: PayloadSize, max_body_size: u64) -> Result<Self, ParseError> {
        let kind = match payload_size {
            PayloadSize::Length(length) => {
                ensure!(length <= max_body_size, ParseError::too_large_body(length, max_body_size));
                Kind::Length(LengthDecoder::new(length))
            }
            PayloadSize::Chunked => Kind::Chunked(ChunkedDecoder::new(max_body_size)),
            PayloadSize::Empty => Kind::NoBody,
        };
        Ok(Self { kind })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, Kind::NoBody)
    }
}

impl Decoder for PayloadDecoder {
    type Item = Bytes;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(src),
            Kind::Chunked(chunked_decoder) => chunked_decoder.decode(src),
            Kind::NoBody => Ok(Some(Bytes::new())),
        }
    }
}
