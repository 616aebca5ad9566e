//! Parameter binding.
//!
//! A handler declares each simple argument it wants as a [`ParamSpec`]: where the raw
//! text comes from, what it must be converted to, whether it may be missing and what
//! to fall back to. [`bind`] resolves a list of declarations against a request in one
//! go, failing on the first declaration that can't be satisfied.
//!
//! [`bind_record`] fills a whole [`Record`] from same-named request parameters. It
//! is deliberately more forgiving: missing parameters leave the zero value behind.
//!
//! # Example
//!
//! ```
//! use mvc_web::binder::{ParamSpec, bind};
//! use mvc_web::ParamMap;
//!
//! let params = ParamMap::from_query("username=hello&age=20");
//! let declared = [ParamSpec::param("username"), ParamSpec::param("age").integer()];
//!
//! let values = bind(&params, &declared).unwrap();
//! assert_eq!(values.str("username"), Some("hello"));
//! assert_eq!(values.int("age"), Some(20));
//! ```

use std::fmt;

use crate::error::BindError;
use crate::record::{Record, RecordShape};
use crate::request::{ParamMap, RequestContext};

/// The primitive type a raw string is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
}

impl ValueKind {
    /// Converts raw text; surrounding whitespace is ignored for numbers.
    pub fn coerce(self, raw: &str) -> Option<BoundValue> {
        match self {
            ValueKind::String => Some(BoundValue::Str(raw.to_owned())),
            ValueKind::Integer => raw.trim().parse().ok().map(BoundValue::Int),
            ValueKind::Long => raw.trim().parse().ok().map(BoundValue::Long),
        }
    }

    /// The value a missing record field takes.
    pub fn zero(self) -> BoundValue {
        match self {
            ValueKind::String => BoundValue::Str(String::new()),
            ValueKind::Integer => BoundValue::Int(0),
            ValueKind::Long => BoundValue::Long(0),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Long => "long",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Str(String),
    Int(i32),
    Long(i64),
    Multi(Vec<String>),
}

impl BoundValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Integers widen to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BoundValue::Int(value) => Some(i64::from(*value)),
            BoundValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            BoundValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            BoundValue::Multi(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Str(value) => f.write_str(value),
            BoundValue::Int(value) => write!(f, "{value}"),
            BoundValue::Long(value) => write!(f, "{value}"),
            BoundValue::Multi(values) => write!(f, "{values:?}"),
        }
    }
}

/// Where the raw text of a declared parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// Query string or urlencoded form body
    Param,
    /// A variable segment of the path template
    Path,
    /// A request header, looked up case-insensitively
    Header,
    Cookie,
}

/// Declares how one handler argument is bound.
///
/// Starts out as a required string; the builder methods refine it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    source: ParamSource,
    kind: ValueKind,
    required: bool,
    default: Option<String>,
    multi: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, source: ParamSource) -> Self {
        Self { name: name.into(), source, kind: ValueKind::String, required: true, default: None, multi: false }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Param)
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Path)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Header)
    }

    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Cookie)
    }

    pub fn string(self) -> Self {
        self.kind(ValueKind::String)
    }

    pub fn integer(self) -> Self {
        self.kind(ValueKind::Integer)
    }

    pub fn long(self) -> Self {
        self.kind(ValueKind::Long)
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Used when the value is absent or empty; coerced like a received value.
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Binds every received value as strings.
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> ParamSource {
        self.source
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }
}

/// Something declared parameters can be looked up in.
pub trait ParamLookup {
    /// Every raw value available for `spec`, in arrival order.
    fn lookup(&self, spec: &ParamSpec) -> Vec<&str>;
}

/// A bare parameter map only answers [`ParamSource::Param`] declarations.
impl ParamLookup for ParamMap {
    fn lookup(&self, spec: &ParamSpec) -> Vec<&str> {
        match spec.source() {
            ParamSource::Param => self.get_all(spec.name()).iter().map(String::as_str).collect(),
            _ => vec![],
        }
    }
}

impl ParamLookup for RequestContext<'_> {
    fn lookup(&self, spec: &ParamSpec) -> Vec<&str> {
        match spec.source() {
            ParamSource::Param => self.params().lookup(spec),
            ParamSource::Path => self.path_params().get(spec.name()).into_iter().collect(),
            ParamSource::Header => {
                self.headers().get_all(spec.name()).iter().filter_map(|value| value.to_str().ok()).collect()
            }
            ParamSource::Cookie => self.cookies().get(spec.name()).into_iter().collect(),
        }
    }
}

/// The outcome of [`bind`]: declared name to converted value.
///
/// Optional declarations that received nothing are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundValues {
    entries: Vec<(String, BoundValue)>,
}

impl BoundValues {
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(BoundValue::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(BoundValue::as_i32)
    }

    pub fn long(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(BoundValue::as_i64)
    }

    pub fn multi(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(BoundValue::as_multi)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves each declaration in order.
///
/// - absent, or empty with a default: the default, converted to the declared kind
/// - absent without default: `MissingParameter` if required, otherwise left unbound
/// - present: the first value, converted; a failed conversion is `TypeMismatch`
/// - multi: every value, unconverted
pub fn bind<S>(source: &S, declared: &[ParamSpec]) -> Result<BoundValues, BindError>
where
    S: ParamLookup + ?Sized,
{
    let mut bound = BoundValues::default();

    for spec in declared {
        let raw_values = source.lookup(spec);

        if spec.is_multi() && !raw_values.is_empty() {
            let values = raw_values.into_iter().map(str::to_owned).collect();
            bound.entries.push((spec.name().to_owned(), BoundValue::Multi(values)));
            continue;
        }

        let raw = match (raw_values.first(), spec.default()) {
            (Some(raw), Some(default)) if raw.is_empty() => default,
            (Some(raw), _) => *raw,
            (None, Some(default)) => default,
            (None, None) if spec.is_required() => return Err(BindError::missing_parameter(spec.name())),
            (None, None) => continue,
        };

        let value = if spec.is_multi() {
            BoundValue::Multi(vec![raw.to_owned()])
        } else {
            spec.value_kind()
                .coerce(raw)
                .ok_or_else(|| BindError::type_mismatch(spec.name(), raw, spec.value_kind()))?
        };

        bound.entries.push((spec.name().to_owned(), value));
    }

    Ok(bound)
}

/// Fills every field of `shape` from the same-named parameter.
///
/// Missing parameters leave the field's zero value; only a present value that fails
/// conversion is an error.
pub fn bind_record(params: &ParamMap, shape: &'static RecordShape) -> Result<Record, BindError> {
    let mut record = Record::new(shape);

    for field in shape.fields() {
        let Some(raw) = params.get(field.name()) else {
            continue;
        };
        let value =
            field.kind().coerce(raw).ok_or_else(|| BindError::type_mismatch(field.name(), raw, field.kind()))?;
        record.set(field.name(), value);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDef;

    static HELLO: RecordShape =
        RecordShape::new("HelloData", &[FieldDef::new("username", ValueKind::String), FieldDef::new("age", ValueKind::Integer)]);

    #[test]
    fn binds_declared_params() {
        let params = ParamMap::from_query("username=hello&age=20");
        let declared = [ParamSpec::param("username"), ParamSpec::param("age").integer()];

        let values = bind(&params, &declared).unwrap();

        assert_eq!(values.str("username"), Some("hello"));
        assert_eq!(values.int("age"), Some(20));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn first_value_wins() {
        let params = ParamMap::from_query("username=first&username=second");
        let values = bind(&params, &[ParamSpec::param("username")]).unwrap();
        assert_eq!(values.str("username"), Some("first"));
    }

    #[test]
    fn missing_required_param() {
        let params = ParamMap::from_query("username=hello");
        let result = bind(&params, &[ParamSpec::param("username"), ParamSpec::param("age").integer()]);
        assert_eq!(result, Err(BindError::missing_parameter("age")));
    }

    #[test]
    fn type_mismatch() {
        let params = ParamMap::from_query("age=abc");
        let result = bind(&params, &[ParamSpec::param("age").integer()]);
        assert_eq!(result, Err(BindError::type_mismatch("age", "abc", ValueKind::Integer)));
    }

    #[test]
    fn integer_overflow_is_a_type_mismatch() {
        let params = ParamMap::from_query("age=3000000000&order=3000000000");
        let declared = [ParamSpec::param("order").long()];
        assert_eq!(bind(&params, &declared).unwrap().long("order"), Some(3_000_000_000));

        let result = bind(&params, &[ParamSpec::param("age").integer()]);
        assert!(matches!(result, Err(BindError::TypeMismatch { .. })));
    }

    #[test]
    fn defaults_apply_when_absent_or_empty() {
        let declared =
            [ParamSpec::param("username").default_value("guest"), ParamSpec::param("age").integer().default_value("10")];

        let values = bind(&ParamMap::new(), &declared).unwrap();
        assert_eq!(values.str("username"), Some("guest"));
        assert_eq!(values.int("age"), Some(10));

        let values = bind(&ParamMap::from_query("username=&age="), &declared).unwrap();
        assert_eq!(values.str("username"), Some("guest"));
        assert_eq!(values.int("age"), Some(10));
    }

    #[test]
    fn empty_value_without_default() {
        let params = ParamMap::from_query("username=&age=");

        let values = bind(&params, &[ParamSpec::param("username")]).unwrap();
        assert_eq!(values.str("username"), Some(""));

        let result = bind(&params, &[ParamSpec::param("age").integer()]);
        assert!(matches!(result, Err(BindError::TypeMismatch { .. })));
    }

    #[test]
    fn optional_param_is_left_unbound() {
        let params = ParamMap::from_query("age=20");
        let values = bind(&params, &[ParamSpec::param("username").optional(), ParamSpec::param("age").integer()]).unwrap();

        assert!(!values.contains("username"));
        assert_eq!(values.int("age"), Some(20));
    }

    #[test]
    fn multi_keeps_every_value() {
        let params = ParamMap::from_query("username=a&username=b");
        let values = bind(&params, &[ParamSpec::param("username").multi()]).unwrap();
        assert_eq!(values.multi("username"), Some(&["a".to_owned(), "b".to_owned()][..]));
    }

    #[test]
    fn param_map_ignores_other_sources() {
        let params = ParamMap::from_query("userId=1");
        let result = bind(&params, &[ParamSpec::path("userId")]);
        assert_eq!(result, Err(BindError::missing_parameter("userId")));
    }

    #[test]
    fn record_binding_is_lenient_on_absence() {
        let record = bind_record(&ParamMap::from_query("username=hello"), &HELLO).unwrap();
        assert_eq!(record.str("username"), Some("hello"));
        assert_eq!(record.int("age"), Some(0));

        let record = bind_record(&ParamMap::new(), &HELLO).unwrap();
        assert_eq!(record.str("username"), Some(""));
    }

    #[test]
    fn record_binding_rejects_bad_values() {
        let result = bind_record(&ParamMap::from_query("username=hello&age=old"), &HELLO);
        assert_eq!(result, Err(BindError::type_mismatch("age", "old", ValueKind::Integer)));
    }
}
