use crate::codec::header::HeaderEncoder;
use crate::protocol::SendError;
use bytes::{BufMut, Bytes, BytesMut};
use http::Response;
use tokio_util::codec::Encoder;

/// Encodes a fully buffered response: head first, then the body bytes.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response<Bytes>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response<Bytes>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, body) = item.into_parts();
        self.header_encoder.encode((head, body.len()), dst)?;
        dst.put_slice(&body);
        Ok(())
    }
}
