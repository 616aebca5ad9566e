//! Request body decoding.
//!
//! [`decode_string`] hands a body over as text. [`decode_record`] reads a JSON object
//! into a [`Record`]: the content type is checked first, then each field of the shape
//! is looked up and coerced. Unknown JSON fields are ignored.

use mime::Mime;
use serde_json::{Map, Value};

use crate::binder::{BoundValue, ValueKind};
use crate::error::DecodeError;
use crate::record::{FieldDef, Model, Record, RecordShape};

/// Decodes the body as UTF-8, exactly as received.
pub fn decode_string(body: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(body.to_vec()).map_err(|_utf8_error| DecodeError::InvalidUtf8)
}

/// `application/json` or any `*/*+json` type; parameters such as `charset` don't matter.
pub fn is_json(content_type: &Mime) -> bool {
    (content_type.type_() == mime::APPLICATION && content_type.subtype() == mime::JSON)
        || content_type.suffix() == Some(mime::JSON)
}

/// Reads a JSON object body into a record of `shape`.
///
/// A missing `content_type` is not JSON.
pub fn decode_record(
    body: &[u8],
    content_type: Option<&Mime>,
    shape: &'static RecordShape,
) -> Result<Record, DecodeError> {
    match content_type {
        Some(content_type) if is_json(content_type) => read_record(body, shape),
        Some(content_type) => Err(DecodeError::unsupported_media_type(content_type)),
        None => Err(DecodeError::unsupported_media_type(mime::APPLICATION_OCTET_STREAM)),
    }
}

fn read_record(body: &[u8], shape: &'static RecordShape) -> Result<Record, DecodeError> {
    let value = serde_json::from_slice::<Value>(body).map_err(DecodeError::malformed)?;
    let Value::Object(object) = value else {
        return Err(DecodeError::malformed(format!("expect a json object for {}", shape.name())));
    };
    record_from_object(&object, shape)
}

fn record_from_object(object: &Map<String, Value>, shape: &'static RecordShape) -> Result<Record, DecodeError> {
    let mut record = Record::new(shape);

    for field in shape.fields() {
        match object.get(field.name()) {
            None if field.is_required() => return Err(DecodeError::missing_field(field.name())),
            None | Some(Value::Null) => {}
            Some(value) => {
                let value = coerce(field, value).ok_or_else(|| DecodeError::invalid_field(field.name()))?;
                record.set(field.name(), value);
            }
        }
    }

    Ok(record)
}

/// Numbers and numeric strings become integers; scalars become strings.
fn coerce(field: &FieldDef, value: &Value) -> Option<BoundValue> {
    match (field.kind(), value) {
        (ValueKind::String, Value::String(text)) => Some(BoundValue::Str(text.clone())),
        (ValueKind::String, Value::Number(number)) => Some(BoundValue::Str(number.to_string())),
        (ValueKind::String, Value::Bool(flag)) => Some(BoundValue::Str(flag.to_string())),
        (ValueKind::Integer, Value::Number(number)) => {
            number.as_i64().and_then(|n| i32::try_from(n).ok()).map(BoundValue::Int)
        }
        (ValueKind::Long, Value::Number(number)) => number.as_i64().map(BoundValue::Long),
        (kind @ (ValueKind::Integer | ValueKind::Long), Value::String(text)) => kind.coerce(text),
        _ => None,
    }
}

/// Converts between JSON text and [`Model`]s without going through a request.
///
/// Stateless; [`JSON_CODEC`] is the shared instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

pub static JSON_CODEC: JsonCodec = JsonCodec;

impl JsonCodec {
    pub fn read_value<T: Model>(&self, text: &str) -> Result<T, DecodeError> {
        read_record(text.as_bytes(), T::SHAPE).map(T::from_record)
    }

    pub fn write_value<T: Model>(&self, value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(&value.to_record())
    }
}
