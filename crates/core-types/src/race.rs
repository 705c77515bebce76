use crate::error::CoreError;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

/// The fields a create payload must carry, in column order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "date",
    "event_name",
    "city",
    "country",
    "distance_label",
    "time_str",
];

/// A persisted race result. This is the row shape of the `races` table
/// and the object shape returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Race {
    pub id: i64,
    pub date: String,
    pub event_name: String,
    pub city: String,
    pub country: String,
    pub distance_label: String,
    pub time_str: String,
}

/// A validated race submission, every field already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRace {
    pub date: String,
    pub event_name: String,
    pub city: String,
    pub country: String,
    pub distance_label: String,
    pub time_str: String,
}

impl NewRace {
    /// Validates an untyped create payload.
    ///
    /// Every required key must be present and string values must be non-blank
    /// once trimmed; otherwise `MissingFields` is returned. Values of any other
    /// JSON type count as present, but cannot be stored as text, so they fail
    /// afterwards with `InvalidFieldType`. Keys outside `REQUIRED_FIELDS` are
    /// ignored.
    ///
    /// Arrays and strings have no keys, so they are `MissingFields`. Scalars
    /// (`null`, booleans, numbers) cannot be searched for keys at all and are
    /// rejected with `InvalidPayload`.
    pub fn from_json(payload: &Value) -> Result<Self, CoreError> {
        let object = match payload {
            Value::Object(object) => object,
            Value::Array(_) | Value::String(_) => return Err(CoreError::MissingFields),
            Value::Null => return Err(CoreError::InvalidPayload("null")),
            Value::Bool(_) => return Err(CoreError::InvalidPayload("a boolean")),
            Value::Number(_) => return Err(CoreError::InvalidPayload("a number")),
        };

        let all_present = REQUIRED_FIELDS.iter().all(|field| match object.get(*field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
            None => false,
        });
        if !all_present {
            return Err(CoreError::MissingFields);
        }

        Ok(Self {
            date: trimmed(object, "date")?,
            event_name: trimmed(object, "event_name")?,
            city: trimmed(object, "city")?,
            country: trimmed(object, "country")?,
            distance_label: trimmed(object, "distance_label")?,
            time_str: trimmed(object, "time_str")?,
        })
    }
}

fn trimmed(object: &Map<String, Value>, field: &str) -> Result<String, CoreError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(CoreError::InvalidFieldType(field.to_string())),
        None => Err(CoreError::MissingFields),
    }
}
