//! Turns handler results into HTTP responses.
//!
//! - text (`String`, `&'static str`) is written with the route's `produces` media type,
//!   or `text/plain; charset=utf-8`
//! - [`Json<T>`] is written as an `application/json` object of the model's fields
//! - `(StatusCode, T)` and `(T, StatusCode)` override whatever status `T` chose
//! - `()` is an empty `200 OK`; `Option`, `Result` and `Response` pass through

use crate::body::ResponseBody;
use crate::error::WebError;
use crate::extract::Json;
use crate::record::Model;
use crate::request::RequestContext;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use mime::Mime;
use std::convert::Infallible;
use tracing::error;

pub trait Responder {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody>;
}

/// Writes `body` with the given content type and status.
pub fn write(body: impl Into<ResponseBody>, content_type: &Mime, status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    match HeaderValue::from_str(content_type.as_ref()) {
        Ok(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        Err(e) => error!(cause = %e, content_type = %content_type, "skip invalid content type"),
    }
    response
}

fn write_text(body: impl Into<ResponseBody>, req: &RequestContext<'_>) -> Response<ResponseBody> {
    let content_type = req.produces().unwrap_or(&mime::TEXT_PLAIN_UTF_8);
    write(body, content_type, StatusCode::OK)
}

impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => e.response_to(req),
        }
    }
}

/// None case returns an empty response.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        match self {
            Some(t) => t.response_to(req),
            None => Response::new(ResponseBody::empty()),
        }
    }
}

impl<B> Responder for Response<B>
where
    B: Into<ResponseBody>,
{
    fn response_to(self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
        self.map(Into::into)
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        let (status, responder) = self;
        let mut response = responder.response_to(req);
        *response.status_mut() = status;
        response
    }
}

impl<T: Responder> Responder for (T, StatusCode) {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        let (responder, status) = self;
        (status, responder).response_to(req)
    }
}

impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        (*self).response_to(req)
    }
}

impl Responder for () {
    fn response_to(self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
        Response::new(ResponseBody::empty())
    }
}

impl Responder for &'static str {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        write_text(self, req)
    }
}

impl Responder for String {
    fn response_to(self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        write_text(self, req)
    }
}

impl<T: Model> Responder for Json<T> {
    fn response_to(self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
        match serde_json::to_vec(&self.0.to_record()) {
            Ok(body) => write(body, &mime::APPLICATION_JSON, StatusCode::OK),
            Err(e) => {
                error!(cause = %e, "serialize json response error");
                write("", &mime::TEXT_PLAIN_UTF_8, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// The error message as plain text, with the error's status code.
impl Responder for WebError {
    fn response_to(self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
        write(self.to_string(), &mime::TEXT_PLAIN_UTF_8, self.status_code())
    }
}

impl Responder for Infallible {
    fn response_to(self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
        match self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{BoundValue, ValueKind};
    use crate::error::BindError;
    use crate::handler_fn;
    use crate::record::{FieldDef, Record, RecordShape};
    use crate::request::{IncomingRequest, PathParams};
    use crate::router::{Router, post};
    use bytes::Bytes;
    use http::Request;

    struct Hello {
        username: String,
        age: i32,
    }

    impl Model for Hello {
        const SHAPE: &'static RecordShape = &RecordShape::new(
            "HelloData",
            &[FieldDef::new("username", ValueKind::String), FieldDef::new("age", ValueKind::Integer)],
        );

        fn from_record(record: Record) -> Self {
            Hello { username: record.str("username").unwrap_or_default().to_owned(), age: record.int("age").unwrap_or_default() }
        }

        fn to_record(&self) -> Record {
            Record::new(Self::SHAPE).with("username", BoundValue::Str(self.username.clone())).with("age", BoundValue::Int(self.age))
        }
    }

    async fn ok() -> &'static str {
        "ok"
    }

    fn request() -> IncomingRequest {
        IncomingRequest::new(Request::builder().uri("/mapping-produces").body(Bytes::new()).unwrap())
    }

    fn content_type(response: &Response<ResponseBody>) -> Option<&str> {
        response.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn text_defaults_to_plain_utf8() {
        let request = request();
        let params = PathParams::empty();
        let ctx = RequestContext::new(&request, None, &params);

        let response = "ok".response_to(&ctx);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), Some("text/plain; charset=utf-8"));
        assert_eq!(response.body().as_bytes(), b"ok");
    }

    #[test]
    fn text_uses_route_produces() {
        let router = Router::builder().route("/mapping-produces", post(handler_fn(ok)).produces("text/html")).build().unwrap();
        let request = request();
        let params = PathParams::empty();
        let ctx = RequestContext::new(&request, Some(&router.items()[0]), &params);

        let response = String::from("ok").response_to(&ctx);
        assert_eq!(content_type(&response), Some("text/html"));
    }

    #[test]
    fn json_and_status_override() {
        let request = request();
        let params = PathParams::empty();
        let ctx = RequestContext::new(&request, None, &params);

        let hello = Hello { username: "hello".into(), age: 20 };
        let response = (StatusCode::CREATED, Json(hello)).response_to(&ctx);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(content_type(&response), Some("application/json"));
        assert_eq!(response.body().as_bytes(), br#"{"username":"hello","age":20}"#);
    }

    #[test]
    fn unit_option_and_errors() {
        let request = request();
        let params = PathParams::empty();
        let ctx = RequestContext::new(&request, None, &params);

        let response = ().response_to(&ctx);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().as_bytes().is_empty());

        let response = Option::<String>::None.response_to(&ctx);
        assert_eq!(response.status(), StatusCode::OK);

        let result: Result<&'static str, WebError> = Err(BindError::missing_parameter("age").into());
        let response = result.response_to(&ctx);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body().as_bytes(), b"required parameter 'age' is not present");
    }
}
