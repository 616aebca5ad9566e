//! Request mapping.
//!
//! Routes are declared once at startup and kept in registration order. For each
//! request [`Router::at`] walks them in that order and picks the first whose method,
//! path template and filters all accept the request.
//!
//! # Example
//!
//! ```
//! use mvc_web::router::{Router, Scope, get, post};
//! use mvc_web::binder::ParamSpec;
//! use mvc_web::handler_fn;
//!
//! async fn ok() -> &'static str {
//!     "ok"
//! }
//!
//! let router = Router::builder()
//!     .scope(Scope::new("/mapping/users").route("", get(handler_fn(ok))).route("/{userId}", post(handler_fn(ok))))
//!     .route("/mapping-param", get(handler_fn(ok)).params("mode=debug"))
//!     .route("/mapping-consume", post(handler_fn(ok)).consumes("application/json"))
//!     .route("/request-param-v2", get(handler_fn(ok)).bind(ParamSpec::param("age").integer()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(router.len(), 5);
//! ```

pub mod filter;
mod route_spec;

use std::fmt;

use filter::{AllFilter, ConsumesFilter, Filter, HeaderConstraintFilter, ParamFilter};
use http::Method;
use mime::Mime;
use tracing::{debug, trace};

pub use route_spec::{Constraint, MediaTypePattern, PathTemplate, RouteSpec};

use crate::binder::ParamSpec;
use crate::error::RouteError;
use crate::handler::RequestHandler;
use crate::request::{IncomingRequest, PathParams};

/// The immutable route table.
pub struct Router {
    items: Vec<RouterItem>,
}

/// A registered route: its declaration, the filters derived from it and its handler.
pub struct RouterItem {
    spec: RouteSpec,
    filter: AllFilter,
    param_specs: Vec<ParamSpec>,
    handler: Box<dyn RequestHandler>,
}

/// The route picked for a request, with its path variables bound.
#[derive(Debug)]
pub struct RouteMatch<'router> {
    item: &'router RouterItem,
    path_params: PathParams,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The first route, in registration order, that accepts `req`.
    pub fn at(&self, req: &IncomingRequest) -> Option<RouteMatch<'_>> {
        self.items.iter().find_map(|item| {
            item.matches(req).map(|path_params| {
                trace!(method = %req.method(), path = req.path(), route = item.spec.path.as_str(), "route matched");
                RouteMatch { item, path_params }
            })
        })
    }

    pub fn items(&self) -> &[RouterItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl RouterItem {
    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    pub fn produces(&self) -> Option<&Mime> {
        self.spec.produces.as_ref()
    }

    pub fn param_specs(&self) -> &[ParamSpec] {
        &self.param_specs
    }

    pub fn filter(&self) -> &dyn Filter {
        &self.filter
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }

    /// Path variables if this route accepts `req`.
    pub fn matches(&self, req: &IncomingRequest) -> Option<PathParams> {
        if self.spec.method.as_ref().is_some_and(|method| method != req.method()) {
            return None;
        }
        let path_params = self.spec.path.matches(req.path())?;
        self.filter.matches(req).then_some(path_params)
    }
}

impl fmt::Debug for RouterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItem")
            .field("spec", &self.spec)
            .field("param_specs", &self.param_specs)
            .finish_non_exhaustive()
    }
}

impl<'router> RouteMatch<'router> {
    pub fn item(&self) -> &'router RouterItem {
        self.item
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<(String, RouterItemBuilder)>,
}

impl RouterBuilder {
    fn new() -> Self {
        Default::default()
    }

    pub fn route(mut self, path: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        self.routes.push((path.into(), item_builder));
        self
    }

    /// Registers every route of `scope`, in its order, under the scope's prefix.
    pub fn scope(mut self, scope: Scope) -> Self {
        let prefix = scope.prefix;
        self.routes.extend(scope.routes.into_iter().map(|(path, item_builder)| (format!("{prefix}{path}"), item_builder)));
        self
    }

    /// Parses every declaration; the first invalid one fails the whole build.
    pub fn build(self) -> Result<Router, RouteError> {
        let items = self
            .routes
            .into_iter()
            .map(|(path, item_builder)| item_builder.build(&path))
            .collect::<Result<Vec<_>, _>>()?;

        for item in &items {
            let method = item.spec.method.as_ref().map_or("ANY", Method::as_str);
            debug!("mapped {} {}", method, item.spec.path.as_str());
        }

        Ok(Router { items })
    }
}

/// Routes sharing a path prefix, like a class-level mapping.
#[derive(Debug)]
pub struct Scope {
    prefix: String,
    routes: Vec<(String, RouterItemBuilder)>,
}

impl Scope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), routes: vec![] }
    }

    /// `path` is appended to the prefix as is, so `""` maps the prefix itself.
    pub fn route(mut self, path: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        self.routes.push((path.into(), item_builder));
        self
    }
}

macro_rules! method_router {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Starts a route that only accepts ", stringify!($upper_case_method), " requests.")]
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            RouterItemBuilder::new(Some(Method::$upper_case_method), Box::new(handler))
        }
    };
}

method_router!(get, GET);
method_router!(post, POST);
method_router!(put, PUT);
method_router!(patch, PATCH);
method_router!(delete, DELETE);
method_router!(head, HEAD);
method_router!(options, OPTIONS);

/// Starts a route that accepts every method.
pub fn any<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
    RouterItemBuilder::new(None, Box::new(handler))
}

/// Collects a route's declaration; nothing is parsed until [`RouterBuilder::build`].
pub struct RouterItemBuilder {
    method: Option<Method>,
    params: Vec<String>,
    headers: Vec<String>,
    consumes: Vec<String>,
    produces: Option<String>,
    param_specs: Vec<ParamSpec>,
    filters: AllFilter,
    handler: Box<dyn RequestHandler>,
}

impl RouterItemBuilder {
    fn new(method: Option<Method>, handler: Box<dyn RequestHandler>) -> Self {
        Self {
            method,
            params: vec![],
            headers: vec![],
            consumes: vec![],
            produces: None,
            param_specs: vec![],
            filters: filter::all_filter(),
            handler,
        }
    }

    /// Adds a request parameter constraint such as `mode=debug`.
    pub fn params(mut self, expr: impl Into<String>) -> Self {
        self.params.push(expr.into());
        self
    }

    /// Adds a header constraint such as `mode=debug`.
    pub fn headers(mut self, expr: impl Into<String>) -> Self {
        self.headers.push(expr.into());
        self
    }

    /// Adds an accepted request media type; the route matches if any of them does.
    pub fn consumes(mut self, pattern: impl Into<String>) -> Self {
        self.consumes.push(pattern.into());
        self
    }

    /// The `Content-Type` of text responses written by this route.
    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.produces = Some(media_type.into());
        self
    }

    /// Declares how one handler argument is bound, see [`crate::binder::bind`].
    pub fn bind(mut self, param_spec: ParamSpec) -> Self {
        self.param_specs.push(param_spec);
        self
    }

    pub fn with<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.and(filter);
        self
    }

    fn build(self, path: &str) -> Result<RouterItem, RouteError> {
        let path = PathTemplate::parse(path)?;
        let params = self.params.iter().map(|expr| Constraint::parse(expr)).collect::<Result<Vec<_>, _>>()?;
        let headers = self
            .headers
            .iter()
            .map(|expr| Constraint::parse(expr).map(Constraint::into_header_constraint))
            .collect::<Result<Vec<_>, _>>()?;
        let consumes =
            self.consumes.iter().map(|expr| MediaTypePattern::parse(expr)).collect::<Result<Vec<_>, _>>()?;
        let produces = self
            .produces
            .map(|expr| expr.parse::<Mime>().map_err(|_parse_error| RouteError::invalid_media_type(&expr)))
            .transpose()?;

        let mut filter = filter::all_filter();
        params.iter().cloned().for_each(|constraint| {
            filter.and(ParamFilter::new(constraint));
        });
        headers.iter().cloned().for_each(|constraint| {
            filter.and(HeaderConstraintFilter::new(constraint));
        });
        if !consumes.is_empty() {
            filter.and(ConsumesFilter::new(consumes.clone()));
        }
        if !self.filters.is_empty() {
            filter.and(self.filters);
        }

        let spec = RouteSpec { method: self.method, path, params, headers, consumes, produces };
        Ok(RouterItem { spec, filter, param_specs: self.param_specs, handler: self.handler })
    }
}

impl fmt::Debug for RouterItemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItemBuilder")
            .field("method", &self.method)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("consumes", &self.consumes)
            .field("produces", &self.produces)
            .finish_non_exhaustive()
    }
}
