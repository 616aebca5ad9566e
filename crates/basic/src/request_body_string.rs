//! Plain text message bodies.

use bytes::Bytes;
use http::StatusCode;
use mvc_web::extract::RequestEntity;
use mvc_web::payload::decode_string;
use mvc_web::router::{RouterBuilder, post};
use mvc_web::{WebError, handler_fn};
use tracing::info;

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router
        .route("/request-body-string-v1", post(handler_fn(request_body_string_v1)))
        .route("/request-body-string-v2", post(handler_fn(request_body_string_v2)))
        .route("/request-body-string-v3", post(handler_fn(request_body_string_v3)))
        .route("/request-body-String-test", post(handler_fn(request_body_string_test)))
        .route("/request-body-string-v4", post(handler_fn(request_body_string_v4)))
}

/// Decodes the raw bytes itself.
pub async fn request_body_string_v1(body: Bytes) -> Result<&'static str, WebError> {
    let message_body = decode_string(&body)?;
    info!("messageBody={}", message_body);
    Ok("ok")
}

pub async fn request_body_string_v2(message_body: String) -> &'static str {
    info!("messageBody={}", message_body);
    "ok"
}

pub async fn request_body_string_v3(entity: RequestEntity<String>) -> &'static str {
    info!("messageBody={}", entity.body);
    "ok"
}

pub async fn request_body_string_test(entity: RequestEntity<String>) -> (StatusCode, &'static str) {
    info!("requestEntity={}", entity);
    (StatusCode::OK, "hello world")
}

pub async fn request_body_string_v4(message_body: String) -> &'static str {
    info!("messageBody={}", message_body);
    "ok"
}
