use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use mvc_http::codec::{RequestDecoder, ResponseEncoder};
use mvc_http::connection::HttpConnection;
use mvc_http::handler::make_handler;
use std::convert::Infallible;
use std::hint::black_box;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Decoder, Encoder};

const GET_REQUEST: &[u8] = b"GET /hello-basic HTTP/1.1\r\nHost: localhost\r\n\r\n";
const JSON_REQUEST: &[u8] =
    b"POST /request-body-json-v3 HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 29\r\n\r\n{\"username\":\"hello\",\"age\":20}";

/// Reads from a fixed buffer and discards everything written.
struct MockIo {
    read_data: &'static [u8],
    read_pos: usize,
}

impl MockIo {
    fn new(read_data: &'static [u8]) -> Self {
        Self { read_data, read_pos: 0 }
    }
}

impl AsyncRead for MockIo {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

struct Sink;

impl AsyncWrite for Sink {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

async fn hello(_req: Request<Bytes>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::new(Full::new(Bytes::from_static(b"ok"))))
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_get_request", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::from(GET_REQUEST);
            black_box(RequestDecoder::new().decode(&mut bytes).unwrap());
        });
    });

    c.bench_function("decode_json_request", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::from(JSON_REQUEST);
            black_box(RequestDecoder::new().decode(&mut bytes).unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Bytes::from_static(b"ok"))
        .unwrap();

    c.bench_function("encode_text_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            black_box(ResponseEncoder::new().encode(response.clone(), &mut bytes).unwrap());
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = Arc::new(make_handler(hello));

    c.bench_function("process_get_request", |b| {
        b.iter(|| {
            let connection = HttpConnection::new(MockIo::new(GET_REQUEST), Sink);
            black_box(block_on(connection.process(Arc::clone(&handler))).unwrap());
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
