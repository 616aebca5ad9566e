//! HTTP request header decoder.
//!
//! Parses the request line and header fields with `httparse`, converts them into a
//! typed [`RequestHeader`] and works out how the body that follows is framed.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header size: 8KB
//! - HTTP/1.0 and HTTP/1.1 only

use bytes::{Buf, BytesMut};
use http::{HeaderValue, Request};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;

use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decoder for HTTP request headers.
///
/// On success the header bytes are consumed from the buffer, leaving the body (if any)
/// at its front.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // the shortest request line plus the empty line can't be shorter than this
        if src.len() < 14 {
            return Ok(None);
        }

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let parsed_result = req.parse(src.as_ref()).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        });

        let body_offset = match parsed_result? {
            Status::Complete(body_offset) => body_offset,
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                return Ok(None);
            }
        };

        trace!(header_size = body_offset, "parsed request header");
        ensure!(body_offset <= MAX_HEADER_BYTES, ParseError::too_large_header(body_offset, MAX_HEADER_BYTES));

        let version = match req.version {
            Some(0) => http::Version::HTTP_10,
            Some(1) => http::Version::HTTP_11,
            // HTTP/2 and HTTP/3 are not supported
            _ => return Err(ParseError::InvalidVersion(req.version)),
        };

        let mut header_builder = Request::builder()
            .method(req.method.ok_or(ParseError::InvalidMethod)?)
            .uri(req.path.ok_or(ParseError::InvalidUri)?)
            .version(version);

        if let Some(headers) = header_builder.headers_mut() {
            headers.reserve(req.headers.len());
        }

        for header in req.headers.iter() {
            let value = HeaderValue::from_bytes(header.value).map_err(|e| ParseError::invalid_header(e.to_string()))?;
            header_builder = header_builder.header(header.name, value);
        }

        let header = header_builder.body(()).map_err(|e| ParseError::invalid_header(e.to_string()))?;
        src.advance(body_offset);

        let header = RequestHeader::from(header);
        let payload_size = parse_payload(&header)?;

        Ok(Some((header, payload_size)))
    }
}

/// Works out the body framing from `Content-Length` and `Transfer-Encoding`,
/// refer: <https://www.rfc-editor.org/rfc/rfc9112.html#name-transfer-encoding>
///
/// The method plays no part: a `GET` or `DELETE` that declares a body has one.
fn parse_payload(header: &RequestHeader) -> Result<PayloadSize, ParseError> {
    let te_header = header.headers().get(http::header::TRANSFER_ENCODING);
    let cl_header = header.headers().get(http::header::CONTENT_LENGTH);

    match (te_header, cl_header) {
        (None, None) => Ok(PayloadSize::new_empty()),

        (te_value @ Some(_), None) => {
            if is_chunked(te_value) {
                Ok(PayloadSize::new_chunked())
            } else {
                Ok(PayloadSize::new_empty())
            }
        }

        (None, Some(cl_value)) => {
            let cl_str = cl_value.to_str().map_err(|_to_str_error| ParseError::invalid_content_length("value can't to_str"))?;

            let length = cl_str
                .trim()
                .parse::<u64>()
                .map_err(|_parse_error| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;

            Ok(PayloadSize::new_length(length))
        }

        (Some(_), Some(_)) => {
            Err(ParseError::invalid_content_length("transfer_encoding and content_length both present in headers"))
        }
    }
}

/// `chunked` counts only as the final transfer coding.
fn is_chunked(header_value: Option<&HeaderValue>) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    header_value
        .and_then(|value| value.as_bytes().rsplit(|b| *b == b',').next())
        .is_some_and(|last| last.trim_ascii().eq_ignore_ascii_case(CHUNKED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, Method, Version};
    use indoc::indoc;

    #[test]
    fn check_is_chunked() {
        let headers = HeaderMap::new();
        assert!(!is_chunked(headers.get(http::header::TRANSFER_ENCODING)));

        let mut headers = HeaderMap::new();
        headers.insert("Transfer-Encoding", "gzip, chunked".parse().unwrap());
        assert!(is_chunked(headers.get(http::header::TRANSFER_ENCODING)));

        let mut headers = HeaderMap::new();
        headers.insert("Transfer-Encoding", "chunked, gzip".parse().unwrap());
        assert!(!is_chunked(headers.get(http::header::TRANSFER_ENCODING)));
    }

    #[test]
    fn leaves_body_in_buffer() {
        let str = indoc! {r##"
        POST /request-body-string-v1 HTTP/1.1
        Host: 127.0.0.1:8080
        Content-Type: text/plain
        Content-Length: 3

        123"##};

        let mut bytes = BytesMut::from(str);
        let (header, payload_size) = HeaderDecoder.decode(&mut bytes).unwrap().unwrap();

        assert_eq!(header.method(), &Method::POST);
        assert_eq!(payload_size, PayloadSize::Length(3));
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /mapping-param?mode=debug HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let mut buf = BytesMut::from(str);
        let (header, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());
        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().path(), "/mapping-param");
        assert_eq!(header.uri().query(), Some("mode=debug"));
        assert_eq!(header.headers().len(), 3);
        assert_eq!(header.headers().get(http::header::ACCEPT), Some(&HeaderValue::from_static("*/*")));
        assert_eq!(header.headers().get(http::header::HOST), Some(&HeaderValue::from_static("127.0.0.1:8080")));
    }

    #[test]
    fn partial_header_needs_more_bytes() {
        let mut buf = BytesMut::from("GET /hello-basic HTTP/1.1\r\nHost: local");
        assert!(HeaderDecoder.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), "GET /hello-basic HTTP/1.1\r\nHost: local".len());
    }

    #[test]
    fn rejects_oversized_header() {
        let mut raw = String::from("GET / HTTP/1.1\r\nX-Padding: ");
        raw.push_str(&"a".repeat(MAX_HEADER_BYTES + 1));
        let mut buf = BytesMut::from(raw.as_str());

        let result = HeaderDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooLargeHeader { .. })));
    }

    #[test]
    fn body_framing_does_not_depend_on_method() {
        let str = indoc! {r##"
        DELETE /request-param-v3 HTTP/1.1
        Content-Type: application/x-www-form-urlencoded
        Content-Length: 21

        username=hello&age=20"##};

        let mut buf = BytesMut::from(str);
        let (header, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(header.method(), &Method::DELETE);
        assert_eq!(payload_size, PayloadSize::Length(21));
        assert_eq!(&buf[..], &b"username=hello&age=20"[..]);

        let mut buf = BytesMut::from("GET /x HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n");
        let (_, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(payload_size, PayloadSize::Chunked);
    }

    #[test]
    fn rejects_conflicting_framing_headers() {
        let str = "POST / HTTP/1.1\r\nContent-Length: 3\r\nTransfer-Encoding: chunked\r\n\r\n";
        let mut buf = BytesMut::from(str);

        let result = HeaderDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }
}
