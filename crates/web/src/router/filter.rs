//! Composable request filters.
//!
//! Every condition a route puts on a request beyond its path is a [`Filter`]:
//! parameter and header constraints, the consumed media types, and any custom
//! check attached with [`RouterItemBuilder::with`](super::RouterItemBuilder::with).
//!
//! # Examples
//!
//! ```
//! use mvc_web::router::filter::{all_filter, fn_filter, header, post_method};
//!
//! let mut combined = all_filter();
//! combined
//!     .and(post_method())
//!     .and(header("mode", "debug"))
//!     .and(fn_filter(|req| req.path().starts_with("/mapping")));
//! ```

use std::fmt;

use http::{HeaderName, HeaderValue, Method};

use crate::request::IncomingRequest;
use crate::router::{Constraint, MediaTypePattern};

/// Decides whether a request is acceptable for a route.
///
/// Filters are shared across connections, hence `Send + Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait Filter: Send + Sync {
    fn matches(&self, req: &IncomingRequest) -> bool;
}

struct FnFilter<F: Fn(&IncomingRequest) -> bool>(F);

impl<F: Fn(&IncomingRequest) -> bool + Send + Sync> Filter for FnFilter<F> {
    fn matches(&self, req: &IncomingRequest) -> bool {
        (self.0)(req)
    }
}

/// Creates a filter from a closure.
pub fn fn_filter<F>(f: F) -> impl Filter
where
    F: Fn(&IncomingRequest) -> bool + Send + Sync,
{
    FnFilter(f)
}

pub fn true_filter() -> TrueFilter {
    TrueFilter
}

#[derive(Debug)]
pub struct TrueFilter;

impl Filter for TrueFilter {
    #[inline]
    fn matches(&self, _req: &IncomingRequest) -> bool {
        true
    }
}

pub fn any_filter() -> AnyFilter {
    AnyFilter::new()
}

/// OR-composition; an empty chain matches everything.
pub struct AnyFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AnyFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn or<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl fmt::Debug for AnyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyFilter").field("filters", &self.filters.len()).finish()
    }
}

impl Filter for AnyFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|filter| filter.matches(req))
    }
}

pub fn all_filter() -> AllFilter {
    AllFilter::new()
}

/// AND-composition; an empty chain matches everything.
pub struct AllFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AllFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn and<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for AllFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllFilter").field("filters", &self.filters.len()).finish()
    }
}

impl Filter for AllFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        self.filters.iter().all(|filter| filter.matches(req))
    }
}

#[derive(Debug)]
pub struct MethodFilter(Method);

impl MethodFilter {
    pub fn new(method: Method) -> Self {
        Self(method)
    }
}

impl Filter for MethodFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        self.0.eq(req.method())
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Creates a filter that matches HTTP ", stringify!($upper_case_method), " requests.")]
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);
method_filter!(put_method, PUT);
method_filter!(delete_method, DELETE);
method_filter!(head_method, HEAD);
method_filter!(options_method, OPTIONS);
method_filter!(patch_method, PATCH);

/// Matches when the named header carries exactly `header_value`.
///
/// An invalid name or value yields a filter that never matches.
pub fn header<K, V>(header_name: K, header_value: V) -> HeaderFilter
where
    HeaderName: TryFrom<K>,
    HeaderValue: TryFrom<V>,
{
    let name = HeaderName::try_from(header_name).ok();
    let value = HeaderValue::try_from(header_value).ok();
    HeaderFilter(name.zip(value))
}

#[derive(Debug)]
pub struct HeaderFilter(Option<(HeaderName, HeaderValue)>);

impl Filter for HeaderFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        let Some((name, value)) = &self.0 else {
            return false;
        };
        req.headers().get(name).is_some_and(|actual| actual == value)
    }
}

/// Checks a constraint against the request parameters.
#[derive(Debug)]
pub struct ParamFilter(Constraint);

impl ParamFilter {
    pub fn new(constraint: Constraint) -> Self {
        Self(constraint)
    }
}

impl Filter for ParamFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        self.0.check(req.params().get(self.0.name()))
    }
}

/// Checks a constraint against the request headers; names are case-insensitive.
#[derive(Debug)]
pub struct HeaderConstraintFilter(Constraint);

impl HeaderConstraintFilter {
    pub fn new(constraint: Constraint) -> Self {
        Self(constraint)
    }
}

impl Filter for HeaderConstraintFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        self.0.check_bytes(req.headers().get(self.0.name()).map(HeaderValue::as_bytes))
    }
}

/// Matches when the request content type satisfies at least one pattern.
///
/// A request without `Content-Type` is taken as `application/octet-stream`.
#[derive(Debug)]
pub struct ConsumesFilter(Vec<MediaTypePattern>);

impl ConsumesFilter {
    pub fn new(patterns: Vec<MediaTypePattern>) -> Self {
        Self(patterns)
    }
}

impl Filter for ConsumesFilter {
    fn matches(&self, req: &IncomingRequest) -> bool {
        let content_type = req.content_type().unwrap_or(&mime::APPLICATION_OCTET_STREAM);
        self.0.iter().any(|pattern| pattern.matches(content_type))
    }
}
