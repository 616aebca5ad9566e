use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use http::header::{CONNECTION, HeaderValue};
use http::{Request, Response, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, error, info};

use crate::codec::{DEFAULT_MAX_BODY_SIZE, RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, SendError, is_keep_alive};

/// An HTTP/1.1 connection over a split reader and writer.
///
/// Requests are processed strictly in order; a pipelined request waits in the read
/// buffer until the response to the previous one has been written.
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_max_body_size(reader, writer, DEFAULT_MAX_BODY_SIZE)
    }

    pub fn with_max_body_size(reader: R, writer: W, max_body_size: u64) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::with_max_body_size(max_body_size), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
        }
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
        <H::RespBody as Body>::Error: Display,
    {
        loop {
            match self.framed_read.next().await {
                Some(Ok(request)) => {
                    let keep_alive = is_keep_alive(request.version(), request.headers());
                    self.do_process(request, handler.as_ref(), keep_alive).await?;
                    if !keep_alive {
                        debug!("client asked to close the connection");
                        return Ok(());
                    }
                }

                Some(Err(e)) => {
                    error!("can't receive next request, cause {}", e);
                    let mut error_response = build_error_response(e.status_code());
                    error_response.headers_mut().insert(CONNECTION, HeaderValue::from_static("close"));
                    self.framed_write.send(error_response).await?;
                    return Err(e.into());
                }

                None => {
                    info!("cant read more request, break this connection down");
                    return Ok(());
                }
            }
        }
    }

    async fn do_process<H>(&mut self, request: Request<Bytes>, handler: &H, keep_alive: bool) -> Result<(), HttpError>
    where
        H: Handler,
        <H::RespBody as Body>::Error: Display,
    {
        let mut response = match handler.call(request).await {
            Ok(response) => collect_response(response).await?,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!("handle response error, cause: {}", e);
                build_error_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        if !keep_alive {
            response.headers_mut().insert(CONNECTION, HeaderValue::from_static("close"));
        }

        self.framed_write.send(response).await?;
        Ok(())
    }
}

async fn collect_response<B>(response: Response<B>) -> Result<Response<Bytes>, SendError>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let (parts, body) = response.into_parts();
    let collected = body.collect().await.map_err(|e| SendError::invalid_body(format!("resolve response body error: {e}")))?;
    Ok(Response::from_parts(parts, collected.to_bytes()))
}

fn build_error_response(status_code: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status_code;
    response
}
