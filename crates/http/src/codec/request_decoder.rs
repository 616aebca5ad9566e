//! HTTP request decoder
//!
//! Runs header parsing and body buffering as a two-phase state machine and yields
//! one complete [`Request<Bytes>`] per HTTP request on the stream.
//!
//! # Example
//!
//! ```no_run
//! use mvc_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET /hello-basic HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.uri().path(), "/hello-basic");
//! ```

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{ParseError, RequestHeader};
use bytes::{Bytes, BytesMut};
use http::Request;
use std::mem;
use tokio_util::codec::Decoder;

/// Default upper bound for a buffered request body
pub const DEFAULT_MAX_BODY_SIZE: u64 = 2 * 1024 * 1024;

/// A decoder for complete HTTP requests
///
/// - `Header`: parsing the request line and headers
/// - `Body`: buffering the body of the request whose header was parsed
#[derive(Debug)]
pub struct RequestDecoder {
    state: State,
    max_body_size: u64,
}

#[derive(Debug)]
enum State {
    Header,
    Body(RequestHeader, PayloadDecoder),
}

impl RequestDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_max_body_size(max_body_size: u64) -> Self {
        Self { state: State::Header, max_body_size }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_max_body_size(DEFAULT_MAX_BODY_SIZE)
    }
}

impl Decoder for RequestDecoder {
    type Item = Request<Bytes>;
    type Error = ParseError;

    /// - `Ok(Some(request))`: a full request, body included
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the stream can't be decoded any further
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let State::Header = self.state {
            let Some((header, payload_size)) = HeaderDecoder.decode(src)? else {
                return Ok(None);
            };

            let payload_decoder = PayloadDecoder::new(payload_size, self.max_body_size)?;
            if payload_decoder.is_empty() {
                return Ok(Some(header.body(Bytes::new())));
            }
            self.state = State::Body(header, payload_decoder);
        }

        let State::Body(_, payload_decoder) = &mut self.state else {
            return Ok(None);
        };

        let Some(body) = payload_decoder.decode(src)? else {
            return Ok(None);
        };

        match mem::replace(&mut self.state, State::Header) {
            State::Body(header, _) => Ok(Some(header.body(body))),
            State::Header => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use indoc::indoc;

    #[test]
    fn decodes_pipelined_requests() {
        let str = indoc! {r##"
        POST /request-body-json-v3 HTTP/1.1
        Content-Type: application/json
        Content-Length: 30

        {"username":"hello","age":20}
        GET /hello-basic HTTP/1.1
        Host: localhost

        "##};

        let mut buffer = BytesMut::from(str);
        let mut decoder = RequestDecoder::new();

        let first = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(first.method(), &Method::POST);
        assert_eq!(&first.body()[..], b"{\"username\":\"hello\",\"age\":20}\n");

        let second = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(second.method(), &Method::GET);
        assert_eq!(second.uri().path(), "/hello-basic");
        assert!(second.body().is_empty());

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn waits_for_the_rest_of_the_body() {
        let mut buffer = BytesMut::from("POST /request-body-string-v4 HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello");
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b" world");
        let request = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(&request.body()[..], b"hello world");
    }

    #[test]
    fn decodes_chunked_body() {
        let mut buffer = BytesMut::from(
            "POST /request-param-v1 HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n8\r\nusername\r\n6\r\n=hello\r\n0\r\n\r\n",
        );

        let request = RequestDecoder::new().decode(&mut buffer).unwrap().unwrap();
        assert_eq!(&request.body()[..], b"username=hello");
    }

    #[test]
    fn rejects_body_over_limit() {
        let mut buffer = BytesMut::from("POST / HTTP/1.1\r\nContent-Length: 100\r\n\r\n");
        let result = RequestDecoder::with_max_body_size(10).decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::TooLargeBody { .. })));
    }
}
