//! Parsed request line and headers, before the body is attached.

use http::header::CONNECTION;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};

#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Attaches a body, producing the full `Request<T>`.
    pub fn body<T>(self, body: T) -> Request<T> {
        self.inner.map(|_| body)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// HTTP/1.1 defaults to keep-alive, HTTP/1.0 to close; `Connection` overrides both.
    pub fn is_keep_alive(&self) -> bool {
        is_keep_alive(self.version(), self.headers())
    }
}

pub(crate) fn is_keep_alive(version: Version, headers: &HeaderMap) -> bool {
    let connection = headers.get(CONNECTION).and_then(|value| value.to_str().ok()).map(str::to_ascii_lowercase);
    match connection.as_deref() {
        Some(value) if value.split(',').any(|token| token.trim() == "close") => false,
        Some(value) if value.split(',').any(|token| token.trim() == "keep-alive") => true,
        _ => version == Version::HTTP_11,
    }
}

impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}
