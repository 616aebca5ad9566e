//! Reading the request line, headers, cookies and locale.

use http::{HeaderMap, Method};
use mvc_web::binder::ParamSpec;
use mvc_web::extract::Locale;
use mvc_web::router::{RouterBuilder, any};
use mvc_web::{BoundValues, handler_fn};
use tracing::info;

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router.route(
        "/headers",
        any(handler_fn(headers)).bind(ParamSpec::header("host")).bind(ParamSpec::cookie("myCookie").optional()),
    )
}

pub async fn headers(method: Method, locale: Locale, header_map: HeaderMap, values: BoundValues) -> &'static str {
    info!("httpMethod={}", method);
    info!("locale={}", locale);
    info!("headerMap={:?}", header_map);
    info!("host={}", values.str("host").unwrap_or_default());
    info!("cookie={:?}", values.str("myCookie"));
    "ok"
}
