//! Record shapes and the typed models built on them.
//!
//! A [`RecordShape`] is the field list a payload or a set of parameters is bound
//! against. Binding produces a [`Record`], whose values line up with the shape's
//! fields; a [`Model`] converts between a record and a plain Rust struct.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::binder::{BoundValue, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    name: &'static str,
    kind: ValueKind,
    required: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind, required: false }
    }

    /// Marks the field as mandatory in JSON payloads.
    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct RecordShape {
    name: &'static str,
    fields: &'static [FieldDef],
}

impl RecordShape {
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|def| def.name == field)
    }
}

/// Field values aligned with a [`RecordShape`], starting out at each field's zero value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    shape: &'static RecordShape,
    values: Vec<BoundValue>,
}

impl Record {
    pub fn new(shape: &'static RecordShape) -> Self {
        Self { shape, values: shape.fields.iter().map(|field| field.kind.zero()).collect() }
    }

    pub fn shape(&self) -> &'static RecordShape {
        self.shape
    }

    /// Sets a field by name, returning `false` if the shape has no such field.
    pub fn set(&mut self, field: &str, value: BoundValue) -> bool {
        match self.shape.position(field) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    pub fn with(mut self, field: &str, value: BoundValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&BoundValue> {
        self.shape.position(field).and_then(|index| self.values.get(index))
    }

    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(BoundValue::as_str)
    }

    pub fn int(&self, field: &str) -> Option<i32> {
        self.get(field).and_then(BoundValue::as_i32)
    }

    pub fn long(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(BoundValue::as_i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BoundValue)> {
        self.shape.fields.iter().map(|field| field.name).zip(self.values.iter())
    }
}

/// Serializes as a JSON object with the fields in shape order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            match value {
                BoundValue::Str(value) => map.serialize_entry(name, value)?,
                BoundValue::Int(value) => map.serialize_entry(name, value)?,
                BoundValue::Long(value) => map.serialize_entry(name, value)?,
                BoundValue::Multi(values) => map.serialize_entry(name, values)?,
            }
        }
        map.end()
    }
}

/// A plain struct that can be bound from and written as a [`Record`].
///
/// # Example
///
/// ```
/// use mvc_web::binder::{BoundValue, ValueKind};
/// use mvc_web::record::{FieldDef, Model, Record, RecordShape};
///
/// struct Member {
///     name: String,
/// }
///
/// impl Model for Member {
///     const SHAPE: &'static RecordShape = &RecordShape::new("Member", &[FieldDef::new("name", ValueKind::String)]);
///
///     fn from_record(record: Record) -> Self {
///         Member { name: record.str("name").unwrap_or_default().to_owned() }
///     }
///
///     fn to_record(&self) -> Record {
///         Record::new(Self::SHAPE).with("name", BoundValue::Str(self.name.clone()))
///     }
/// }
/// ```
pub trait Model: Sized {
    const SHAPE: &'static RecordShape;

    fn from_record(record: Record) -> Self;

    fn to_record(&self) -> Record;
}
