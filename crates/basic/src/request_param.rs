//! Query and form parameters: read by hand, bound by declaration, or collected
//! into a model.

use mvc_web::binder::{BoundValue, ParamSpec, ValueKind};
use mvc_web::extract::ModelAttribute;
use mvc_web::router::{RouterBuilder, any};
use mvc_web::{BindError, BoundValues, ParamMap, WebError, handler_fn};
use tracing::info;

use crate::hello_data::HelloData;

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router
        .route("/request-param-v1", any(handler_fn(request_param_v1)))
        .route("/request-param-v2", any(handler_fn(request_param_v2)).bind(ParamSpec::param("username")).bind(ParamSpec::param("age").integer()))
        .route("/request-param-v3", any(handler_fn(request_param_v3)).bind(ParamSpec::param("username")).bind(ParamSpec::param("age").integer()))
        .route(
            "/request-param-v4",
            any(handler_fn(request_param_v4)).bind(ParamSpec::param("username").optional()).bind(ParamSpec::param("age").integer()),
        )
        .route(
            "/request-required",
            any(handler_fn(request_required))
                .bind(ParamSpec::param("username").default_value("guest"))
                .bind(ParamSpec::param("age").integer().default_value("10")),
        )
        .route("/request-map", any(handler_fn(request_map)))
        .route("/request-multi-map", any(handler_fn(request_multi_map)))
        .route("/model-attribute-v1", any(handler_fn(model_attribute_v1)))
        .route("/model-attribute-v2", any(handler_fn(model_attribute_v2)))
}

/// Reads the raw parameter map without any declared binding.
pub async fn request_param_v1(params: ParamMap) -> Result<&'static str, WebError> {
    let username = params.get("username").unwrap_or_default();
    let raw_age = params.get("age").ok_or_else(|| BindError::missing_parameter("age"))?;
    let age = ValueKind::Integer
        .coerce(raw_age)
        .as_ref()
        .and_then(BoundValue::as_i32)
        .ok_or_else(|| BindError::type_mismatch("age", raw_age, ValueKind::Integer))?;

    info!("username ={}, age={}", username, age);
    Ok("ok")
}

pub async fn request_param_v2(values: BoundValues) -> &'static str {
    info!("username={}, age={}", values.str("username").unwrap_or_default(), values.int("age").unwrap_or_default());
    "ok"
}

pub async fn request_param_v3(values: BoundValues) -> &'static str {
    info!("username={}, age={}", values.str("username").unwrap_or_default(), values.int("age").unwrap_or_default());
    "ok"
}

pub async fn request_param_v4(values: BoundValues) -> &'static str {
    info!("username={:?}, age={}", values.str("username"), values.int("age").unwrap_or_default());
    "ok"
}

pub async fn request_required(values: BoundValues) -> &'static str {
    info!("username={}, age={}", values.str("username").unwrap_or_default(), values.int("age").unwrap_or_default());
    "ok"
}

pub async fn request_map(params: ParamMap) -> &'static str {
    info!("username={:?}, age={:?}", params.get("username"), params.get("age"));
    "ok"
}

pub async fn request_multi_map(params: ParamMap) -> &'static str {
    info!("username={:?}, age={:?}", params.get_all("username"), params.get_all("age"));
    "ok"
}

pub async fn model_attribute_v1(ModelAttribute(hello_data): ModelAttribute<HelloData>) -> &'static str {
    info!("username={}, age={}", hello_data.username, hello_data.age);
    "ok"
}

pub async fn model_attribute_v2(ModelAttribute(hello_data): ModelAttribute<HelloData>) -> &'static str {
    info!("username={},age={}", hello_data.username, hello_data.age);
    "ok"
}
