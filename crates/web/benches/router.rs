use bytes::Bytes;
use criterion::{Criterion, criterion_group, criterion_main};
use http::{Method, Request};
use mvc_web::binder::{ParamSpec, bind};
use mvc_web::router::{Router, Scope, delete, get, post};
use mvc_web::{IncomingRequest, handler_fn};
use std::hint::black_box;

async fn ok() -> &'static str {
    "ok"
}

fn router() -> Router {
    let mut builder = Router::builder();
    for i in 0..50 {
        builder = builder.route(format!("/static/route-{i}"), get(handler_fn(ok)));
    }

    builder
        .scope(
            Scope::new("/mapping/users")
                .route("", get(handler_fn(ok)))
                .route("", post(handler_fn(ok)))
                .route("/{userId}", get(handler_fn(ok)))
                .route("/{userId}", delete(handler_fn(ok))),
        )
        .route("/mapping/users/{userId}/orders/{orderId}", get(handler_fn(ok)))
        .route("/mapping-param", get(handler_fn(ok)).params("mode=debug"))
        .route("/mapping-consume", post(handler_fn(ok)).consumes("application/json"))
        .build()
        .unwrap()
}

fn request(method: Method, uri: &str, content_type: Option<&str>) -> IncomingRequest {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(http::header::CONTENT_TYPE, content_type);
    }
    IncomingRequest::new(builder.body(Bytes::new()).unwrap())
}

fn bench_router_at(c: &mut Criterion) {
    let router = router();

    let first = request(Method::GET, "/static/route-0", None);
    c.bench_function("router_at_first_route", |b| b.iter(|| black_box(router.at(&first).is_some())));

    let path_variables = request(Method::GET, "/mapping/users/userA/orders/100", None);
    c.bench_function("router_at_path_variables", |b| b.iter(|| black_box(router.at(&path_variables).is_some())));

    let consumes = request(Method::POST, "/mapping-consume", Some("application/json"));
    c.bench_function("router_at_consumes", |b| b.iter(|| black_box(router.at(&consumes).is_some())));

    let not_found = request(Method::GET, "/no-such-route", None);
    c.bench_function("router_at_not_found", |b| b.iter(|| black_box(router.at(&not_found).is_none())));
}

fn bench_bind(c: &mut Criterion) {
    let request = request(Method::GET, "/request-param-v2?username=hello&age=20", None);
    let declared = [ParamSpec::param("username"), ParamSpec::param("age").integer()];

    c.bench_function("bind_params", |b| b.iter(|| black_box(bind(request.params(), &declared).unwrap())));
}

criterion_group!(benches, bench_router_at, bench_bind);
criterion_main!(benches);
