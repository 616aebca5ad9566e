//! Argument extraction.
//!
//! Every handler argument is a [`FromRequest`] type. All arguments are extracted
//! before the handler runs and the first failure is answered with its error response.
//!
//! | argument            | bound from                                                   |
//! |---------------------|--------------------------------------------------------------|
//! | `Method`, `Uri`, `Version`, `HeaderMap` | the request line and headers             |
//! | `Cookies`, [`Locale`] | `Cookie` and `Accept-Language` headers                     |
//! | `ParamMap`          | query and urlencoded form parameters                         |
//! | `PathParams`        | path template variables                                      |
//! | `BoundValues`       | the route's declared [`ParamSpec`](crate::binder::ParamSpec)s |
//! | [`ModelAttribute<T>`] | same-named parameters, leniently                           |
//! | `Bytes`, `String`   | the raw body                                                 |
//! | [`Json<T>`]         | a JSON body                                                  |
//! | [`RequestEntity<B>`] | method, uri, headers and a body extractor                   |

mod extract_body;
mod extract_header;
mod extract_param;
mod extract_tuple;
mod from_request;

pub use from_request::FromRequest;

use std::fmt;

use http::{HeaderMap, Method, Uri};

/// A model read from a JSON request body, or written as one.
///
/// The request must carry an `application/json` (or `+json`) content type,
/// otherwise extraction fails with `415 Unsupported Media Type`.
///
/// # Example
/// ```
/// # use mvc_web::extract::Json;
/// # use mvc_web::record::Model;
/// pub async fn echo<T: Model>(Json(data): Json<T>) -> Json<T> {
///     Json(data)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

/// A model filled from same-named request parameters.
///
/// Missing parameters leave zero values behind; only unconvertible values fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttribute<T>(pub T);

/// The request line, headers and a body read through `B`.
#[derive(Debug, Clone)]
pub struct RequestEntity<B> {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: B,
}

impl<B> RequestEntity<B> {
    pub fn into_body(self) -> B {
        self.body
    }
}

impl<B: fmt::Display> fmt::Display for RequestEntity<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {},{},{:?}>", self.method, self.uri, self.body, self.headers)
    }
}

/// The preferred language of the client: the first `Accept-Language` tag, `en` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(http::header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|tag| tag.split(';').next().unwrap_or_default().trim())
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map(Locale::new)
            .unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn locale_from_accept_language() {
        let mut headers = HeaderMap::new();
        assert_eq!(Locale::from_headers(&headers).tag(), "en");

        headers.insert(http::header::ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8"));
        assert_eq!(Locale::from_headers(&headers).tag(), "ko-KR");

        headers.insert(http::header::ACCEPT_LANGUAGE, HeaderValue::from_static("fr;q=0.7, en"));
        assert_eq!(Locale::from_headers(&headers).tag(), "fr");

        headers.insert(http::header::ACCEPT_LANGUAGE, HeaderValue::from_static("*"));
        assert_eq!(Locale::from_headers(&headers).tag(), "en");
    }
}
