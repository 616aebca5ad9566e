//! The request as seen by routing and binding.
//!
//! - [`IncomingRequest`]: the buffered request with its query/form parameters,
//!   cookies and content type worked out once, up front
//! - [`RequestContext`]: an incoming request plus what routing found for it
//! - [`ParamMap`], [`Cookies`], [`PathParams`]: the lookup tables binders read from

use bytes::Bytes;
use http::header::{CONTENT_TYPE, COOKIE};
use http::{HeaderMap, Method, Request, Uri, Version};
use mime::Mime;
use tracing::warn;

use crate::binder::ParamSpec;
use crate::router::RouterItem;

/// A fully buffered request.
#[derive(Debug)]
pub struct IncomingRequest {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    params: ParamMap,
    cookies: Cookies,
    content_type: Option<Mime>,
    body: Bytes,
}

impl IncomingRequest {
    pub fn new(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Mime>().ok());

        let mut params = ParamMap::from_query(parts.uri.query().unwrap_or_default());
        if is_form(content_type.as_ref()) {
            params.extend_urlencoded(&body);
        }

        let cookies = Cookies::from_headers(&parts.headers);

        Self {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            params,
            cookies,
            content_type,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Query parameters followed by urlencoded form parameters.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    /// The parsed `Content-Type`, `None` when absent or unparsable.
    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<Request<Bytes>> for IncomingRequest {
    fn from(request: Request<Bytes>) -> Self {
        IncomingRequest::new(request)
    }
}

fn is_form(content_type: Option<&Mime>) -> bool {
    content_type.is_some_and(|content_type| {
        content_type.type_() == mime::APPLICATION && content_type.subtype() == mime::WWW_FORM_URLENCODED
    })
}

/// An incoming request together with the route it matched.
///
/// Handlers, extractors and responders only ever see the request through this type.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'req> {
    request: &'req IncomingRequest,
    route: Option<&'req RouterItem>,
    path_params: &'req PathParams,
}

impl<'req> RequestContext<'req> {
    pub fn new(request: &'req IncomingRequest, route: Option<&'req RouterItem>, path_params: &'req PathParams) -> Self {
        Self { request, route, path_params }
    }

    pub fn request(&self) -> &'req IncomingRequest {
        self.request
    }

    pub fn method(&self) -> &'req Method {
        self.request.method()
    }

    pub fn uri(&self) -> &'req Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &'req HeaderMap {
        self.request.headers()
    }

    pub fn params(&self) -> &'req ParamMap {
        self.request.params()
    }

    pub fn cookies(&self) -> &'req Cookies {
        self.request.cookies()
    }

    pub fn content_type(&self) -> Option<&'req Mime> {
        self.request.content_type()
    }

    pub fn body(&self) -> &'req Bytes {
        self.request.body()
    }

    pub fn path_params(&self) -> &'req PathParams {
        self.path_params
    }

    /// The matched route, `None` when the request fell through to the default handler.
    pub fn route(&self) -> Option<&'req RouterItem> {
        self.route
    }

    /// The media type the matched route declared it produces.
    pub fn produces(&self) -> Option<&'req Mime> {
        self.route.and_then(RouterItem::produces)
    }

    /// The parameter declarations attached to the matched route.
    pub fn param_specs(&self) -> &'req [ParamSpec] {
        self.route.map(RouterItem::param_specs).unwrap_or_default()
    }
}

/// Request parameters: name to every value received, in arrival order.
///
/// Lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        params.extend_urlencoded(query.as_bytes());
        params
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Appends `application/x-www-form-urlencoded` pairs; an undecodable input is skipped.
    pub fn extend_urlencoded(&mut self, input: &[u8]) {
        if input.is_empty() {
            return;
        }
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(input) {
            Ok(pairs) => pairs.into_iter().for_each(|(name, value)| self.push(name, value)),
            Err(e) => warn!(cause = %e, "skip undecodable urlencoded parameters"),
        }
    }

    /// The first value received for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, values)| values.as_slice()).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        iter.into_iter().for_each(|(name, value)| params.push(name, value));
        params
    }
}

/// Cookies sent with the request, first occurrence of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    entries: Vec<(String, String)>,
}

impl Cookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut entries: Vec<(String, String)> = vec![];
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='));

        for (name, value) in pairs {
            let name = name.trim();
            if name.is_empty() || entries.iter().any(|(key, _)| key == name) {
                continue;
            }
            entries.push((name.to_owned(), value.trim().trim_matches('"').to_owned()));
        }

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values bound to the variable segments of the matched path template.
///
/// Values are the raw path segments, without percent-decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    #[inline]
    pub fn empty() -> Self {
        Default::default()
    }

    pub(crate) fn push(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_owned(), value.to_owned()));
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect() }
    }
}
