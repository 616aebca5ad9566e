//! Declarative parts of a route: the path template, parameter/header constraints
//! and media type patterns, all parsed from their textual forms at startup.

use http::Method;
use mime::Mime;

use crate::error::RouteError;
use crate::request::PathParams;

/// A `params`/`headers` condition.
///
/// | expression    | meaning                     |
/// |---------------|-----------------------------|
/// | `mode`        | present                     |
/// | `!mode`       | absent                      |
/// | `mode=debug`  | present with that value     |
/// | `mode!=debug` | absent or another value     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Present(String),
    Absent(String),
    Equals(String, String),
    NotEquals(String, String),
}

impl Constraint {
    pub fn parse(expr: &str) -> Result<Self, RouteError> {
        let trimmed = expr.trim();

        let constraint = if let Some((name, value)) = trimmed.split_once("!=") {
            Constraint::NotEquals(name.trim().to_owned(), value.trim().to_owned())
        } else if let Some((name, value)) = trimmed.split_once('=') {
            Constraint::Equals(name.trim().to_owned(), value.trim().to_owned())
        } else if let Some(name) = trimmed.strip_prefix('!') {
            Constraint::Absent(name.trim().to_owned())
        } else {
            Constraint::Present(trimmed.to_owned())
        };

        if constraint.name().is_empty() || constraint.name().starts_with('!') {
            return Err(RouteError::invalid_constraint(expr));
        }
        Ok(constraint)
    }

    pub fn name(&self) -> &str {
        match self {
            Constraint::Present(name)
            | Constraint::Absent(name)
            | Constraint::Equals(name, _)
            | Constraint::NotEquals(name, _) => name,
        }
    }

    /// Checks the value found under [`Self::name`], if any.
    pub fn check(&self, value: Option<&str>) -> bool {
        self.check_bytes(value.map(str::as_bytes))
    }

    /// Like [`Self::check`] for raw values such as header values, which need not be UTF-8.
    pub fn check_bytes(&self, value: Option<&[u8]>) -> bool {
        match self {
            Constraint::Present(_) => value.is_some(),
            Constraint::Absent(_) => value.is_none(),
            Constraint::Equals(_, expected) => value == Some(expected.as_bytes()),
            Constraint::NotEquals(_, expected) => value != Some(expected.as_bytes()),
        }
    }

    /// Header names are matched case-insensitively, so they are kept in lower case.
    pub(crate) fn into_header_constraint(self) -> Self {
        match self {
            Constraint::Present(name) => Constraint::Present(name.to_ascii_lowercase()),
            Constraint::Absent(name) => Constraint::Absent(name.to_ascii_lowercase()),
            Constraint::Equals(name, value) => Constraint::Equals(name.to_ascii_lowercase(), value),
            Constraint::NotEquals(name, value) => Constraint::NotEquals(name.to_ascii_lowercase(), value),
        }
    }
}

/// `type/subtype` where either side may be `*`, optionally negated with a leading `!`.
///
/// A subtype of the form `*+suffix` matches any subtype carrying that suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypePattern {
    type_: String,
    subtype: String,
    negated: bool,
}

impl MediaTypePattern {
    pub fn parse(expr: &str) -> Result<Self, RouteError> {
        let trimmed = expr.trim();
        let (negated, media_type) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };

        let essence = media_type.split(';').next().unwrap_or_default().trim();
        let Some((type_, subtype)) = essence.split_once('/') else {
            return Err(RouteError::invalid_media_type(expr));
        };
        let valid = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace) && !part.contains('/');
        if !valid(type_) || !valid(subtype) {
            return Err(RouteError::invalid_media_type(expr));
        }

        Ok(Self { type_: type_.to_ascii_lowercase(), subtype: subtype.to_ascii_lowercase(), negated })
    }

    /// Whether `content_type` satisfies this pattern; parameters are ignored.
    pub fn matches(&self, content_type: &Mime) -> bool {
        self.includes(content_type) != self.negated
    }

    fn includes(&self, content_type: &Mime) -> bool {
        let type_matches = self.type_ == "*" || self.type_ == content_type.type_().as_str();
        if !type_matches {
            return false;
        }

        if self.subtype == "*" {
            return true;
        }
        if let Some(suffix) = self.subtype.strip_prefix("*+") {
            return content_type.suffix().is_some_and(|actual| actual.as_str() == suffix);
        }

        let actual = match content_type.suffix() {
            Some(suffix) => format!("{}+{}", content_type.subtype(), suffix),
            None => content_type.subtype().as_str().to_owned(),
        };
        self.subtype == actual
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A `/`-separated path where whole segments may be `{variable}`s.
///
/// Matching is exact: same number of segments, literal segments compared verbatim,
/// no wildcards and no trailing-slash folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(RouteError::invalid_path(path, "must start with '/'"));
        };

        let mut segments = Vec::new();
        for part in rest.split('/') {
            let segment = match part.strip_prefix('{').and_then(|part| part.strip_suffix('}')) {
                Some(name) if name.is_empty() || name.contains(['{', '}']) => {
                    return Err(RouteError::invalid_path(path, format!("invalid variable segment '{part}'")));
                }
                Some(name) => {
                    if segments.iter().any(|segment| matches!(segment, Segment::Variable(existing) if existing == name)) {
                        return Err(RouteError::duplicate_variable(path, name));
                    }
                    Segment::Variable(name.to_owned())
                }
                None if part.contains(['{', '}']) => {
                    return Err(RouteError::invalid_path(path, format!("variable must span the whole segment '{part}'")));
                }
                None => Segment::Literal(part.to_owned()),
            };
            segments.push(segment);
        }

        Ok(Self { raw: path.to_owned(), segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Binds the variables of this template against `path`, `None` if it doesn't fit.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;

        let mut params = PathParams::empty();
        let mut parts = rest.split('/');
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(name) => params.push(name, part),
            }
        }

        match parts.next() {
            Some(_) => None,
            None => Some(params),
        }
    }
}

/// Everything a route declares, besides the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// `None` matches any method
    pub method: Option<Method>,
    pub path: PathTemplate,
    pub params: Vec<Constraint>,
    pub headers: Vec<Constraint>,
    pub consumes: Vec<MediaTypePattern>,
    pub produces: Option<Mime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_constraints() {
        assert_eq!(Constraint::parse("mode").unwrap(), Constraint::Present("mode".into()));
        assert_eq!(Constraint::parse("!mode").unwrap(), Constraint::Absent("mode".into()));
        assert_eq!(Constraint::parse("mode=debug").unwrap(), Constraint::Equals("mode".into(), "debug".into()));
        assert_eq!(Constraint::parse("mode!=debug").unwrap(), Constraint::NotEquals("mode".into(), "debug".into()));
        assert!(Constraint::parse("").is_err());
        assert!(Constraint::parse("=debug").is_err());
        assert!(Constraint::parse("!").is_err());
    }

    #[test]
    fn checks_constraints() {
        assert!(Constraint::parse("mode").unwrap().check(Some("")));
        assert!(!Constraint::parse("mode").unwrap().check(None));
        assert!(Constraint::parse("!mode").unwrap().check(None));
        assert!(Constraint::parse("mode=debug").unwrap().check(Some("debug")));
        assert!(!Constraint::parse("mode=debug").unwrap().check(Some("Debug")));
        assert!(Constraint::parse("mode!=debug").unwrap().check(None));
        assert!(Constraint::parse("mode!=debug").unwrap().check(Some("info")));
        assert!(!Constraint::parse("mode!=debug").unwrap().check(Some("debug")));
    }

    #[test]
    fn media_type_patterns() {
        let json: Mime = "application/json;charset=UTF-8".parse().unwrap();
        let problem: Mime = "application/problem+json".parse().unwrap();

        assert!(MediaTypePattern::parse("application/json").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("application/*").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("*/*").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("application/*+json").unwrap().matches(&problem));
        assert!(!MediaTypePattern::parse("application/*+json").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("application/problem+json").unwrap().matches(&problem));
        assert!(!MediaTypePattern::parse("text/plain").unwrap().matches(&json));
        assert!(!MediaTypePattern::parse("!application/json").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("!text/plain").unwrap().matches(&json));
        assert!(MediaTypePattern::parse("no-slash").is_err());
        assert!(MediaTypePattern::parse("/json").is_err());
    }

    #[test]
    fn path_template_matching() {
        let template = PathTemplate::parse("/mapping/users/{userId}/orders/{orderId}").unwrap();
        let params = template.matches("/mapping/users/userA/orders/100").unwrap();

        assert_eq!(params.get("userId"), Some("userA"));
        assert_eq!(params.get("orderId"), Some("100"));
        assert_eq!(template.variables().collect::<Vec<_>>(), ["userId", "orderId"]);

        assert!(template.matches("/mapping/users/userA/orders").is_none());
        assert!(template.matches("/mapping/users/userA/orders/100/x").is_none());
        assert!(template.matches("/mapping/members/userA/orders/100").is_none());
    }

    #[test]
    fn trailing_slash_is_significant() {
        let template = PathTemplate::parse("/hello-basic").unwrap();
        assert!(template.matches("/hello-basic").is_some());
        assert!(template.matches("/hello-basic/").is_none());

        let root = PathTemplate::parse("/").unwrap();
        assert!(root.matches("/").is_some());
        assert!(root.matches("/hello-basic").is_none());
    }

    #[test]
    fn variables_match_a_whole_segment_only() {
        let template = PathTemplate::parse("/mapping/{userId}").unwrap();
        assert_eq!(template.matches("/mapping/userA").unwrap().get("userId"), Some("userA"));
        assert!(template.matches("/mapping/users/userA").is_none());
    }

    #[test]
    fn invalid_templates() {
        assert_eq!(
            PathTemplate::parse("/users/{id}/orders/{id}"),
            Err(RouteError::duplicate_variable("/users/{id}/orders/{id}", "id"))
        );
        assert!(matches!(PathTemplate::parse("users"), Err(RouteError::InvalidPath { .. })));
        assert!(matches!(PathTemplate::parse("/users/{}"), Err(RouteError::InvalidPath { .. })));
        assert!(matches!(PathTemplate::parse("/users/id-{id}"), Err(RouteError::InvalidPath { .. })));
    }
}
