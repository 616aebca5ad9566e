use std::fmt;

use mvc_web::binder::{BoundValue, ValueKind};
use mvc_web::record::{FieldDef, Model, Record, RecordShape};

static HELLO_DATA: RecordShape =
    RecordShape::new("HelloData", &[FieldDef::new("username", ValueKind::String), FieldDef::new("age", ValueKind::Integer)]);

/// The payload every binding walkthrough reads, from parameters or from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelloData {
    pub username: String,
    pub age: i32,
}

impl HelloData {
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self { username: username.into(), age }
    }
}

impl Model for HelloData {
    const SHAPE: &'static RecordShape = &HELLO_DATA;

    fn from_record(record: Record) -> Self {
        Self {
            username: record.str("username").unwrap_or_default().to_owned(),
            age: record.int("age").unwrap_or_default(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new(Self::SHAPE)
            .with("username", BoundValue::Str(self.username.clone()))
            .with("age", BoundValue::Int(self.age))
    }
}

impl fmt::Display for HelloData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HelloData(username={}, age={})", self.username, self.age)
    }
}
