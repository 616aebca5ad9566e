//! Request mapping by method, path variables, parameters, headers and media types.

use mvc_web::binder::ParamSpec;
use mvc_web::router::{RouterBuilder, any, get, post};
use mvc_web::{BoundValues, PathParams, handler_fn};
use tracing::info;

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router
        .route("/hello-basic", any(handler_fn(hello_basic)))
        .route("/mapping-get-v1", get(handler_fn(mapping_get_v1)))
        .route("/mapping-get-v2", get(handler_fn(mapping_get_v2)))
        .route("/mapping/{userId}", get(handler_fn(mapping_path)))
        .route(
            "/mapping/users/{userId}/orders/{orderId}",
            get(handler_fn(mapping_order_path)).bind(ParamSpec::path("userId")).bind(ParamSpec::path("orderId").long()),
        )
        .route("/mapping-param", get(handler_fn(mapping_param)).params("mode=debug"))
        .route("/mapping-header", get(handler_fn(mapping_header)).headers("mode=debug"))
        .route("/mapping-consume", post(handler_fn(mapping_consumes)).consumes("application/json"))
        .route("/mapping-consume-v2", post(handler_fn(mapping_consumes_v2)).consumes(mime::APPLICATION_JSON.essence_str()))
        .route("/mapping-produces", post(handler_fn(mapping_produces)).produces("text/html"))
}

pub async fn hello_basic() -> &'static str {
    info!("helloBasic");
    "ok"
}

pub async fn mapping_get_v1() -> &'static str {
    info!("mappingGetV1");
    "ok"
}

pub async fn mapping_get_v2() -> &'static str {
    info!("mapping-get-v2");
    "ok"
}

pub async fn mapping_path(path_params: PathParams) -> &'static str {
    info!("mappingPath userId={}", path_params.get("userId").unwrap_or_default());
    "ok"
}

pub async fn mapping_order_path(values: BoundValues) -> &'static str {
    info!("mappingPath userId={}, orderId={}", values.str("userId").unwrap_or_default(), values.long("orderId").unwrap_or_default());
    "ok"
}

pub async fn mapping_param() -> &'static str {
    info!("mappingParam");
    "ok"
}

pub async fn mapping_header() -> &'static str {
    info!("mappingHeader");
    "ok"
}

pub async fn mapping_consumes() -> &'static str {
    info!("mappingConsumes");
    "ok"
}

pub async fn mapping_consumes_v2() -> &'static str {
    info!("mappingConsumesV2");
    "ok"
}

pub async fn mapping_produces() -> &'static str {
    info!("mappingProduces");
    "ok"
}
