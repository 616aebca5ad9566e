//! JSON message bodies, decoded by hand through the shared codec or bound as a model.

use http::StatusCode;
use mvc_web::extract::{Json, RequestEntity};
use mvc_web::payload::JSON_CODEC;
use mvc_web::router::{RouterBuilder, post};
use mvc_web::{WebError, handler_fn};
use tracing::info;

use crate::hello_data::HelloData;

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router
        .route("/request-body-json-v1", post(handler_fn(request_body_json_v1)))
        .route("/request-body-json-v2", post(handler_fn(request_body_json_v2)))
        .route("/request-body-json-v3", post(handler_fn(request_body_json_v3)))
        .route("/request-body-json-v4", post(handler_fn(request_body_json_v4)))
        .route("/request-body-json-v5", post(handler_fn(request_body_json_v5)))
        .route("/request-body-resp-entity", post(handler_fn(request_body_resp_entity)))
        .route("/request-body-json-v6", post(handler_fn(request_body_entity)))
        .route("/request-body-entity", post(handler_fn(request_body_entity)))
}

pub async fn request_body_json_v1(message_body: String) -> Result<&'static str, WebError> {
    info!("messageBody={}", message_body);
    let data = JSON_CODEC.read_value::<HelloData>(&message_body)?;
    info!("data={}", data);
    info!("username={},age={}", data.username, data.age);
    Ok("ok")
}

pub async fn request_body_json_v2(message_body: String) -> Result<&'static str, WebError> {
    let data = JSON_CODEC.read_value::<HelloData>(&message_body)?;
    info!("username={},age={}", data.username, data.age);
    Ok("ok")
}

pub async fn request_body_json_v3(Json(data): Json<HelloData>) -> &'static str {
    info!("username={},age={}", data.username, data.age);
    "ok"
}

pub async fn request_body_json_v4(entity: RequestEntity<Json<HelloData>>) -> &'static str {
    let Json(data) = entity.into_body();
    info!("username={},age={}", data.username, data.age);
    "ok"
}

pub async fn request_body_json_v5(Json(data): Json<HelloData>) -> Json<HelloData> {
    info!("username={}, age={}", data.username, data.age);
    Json(data)
}

pub async fn request_body_resp_entity(entity: RequestEntity<Json<HelloData>>) -> Json<HelloData> {
    let Json(data) = entity.into_body();
    info!("username={}, age={}", data.username, data.age);
    Json(data)
}

/// Echoes the body back with `201 Created`.
pub async fn request_body_entity(entity: RequestEntity<Json<HelloData>>) -> (StatusCode, Json<HelloData>) {
    let Json(data) = entity.into_body();
    info!("username={}, age={}", data.username, data.age);
    (StatusCode::CREATED, Json(data))
}
