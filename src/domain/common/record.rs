//! Opaque table records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{decode_error, Result};

/// Cell text for a missing or null field.
pub const MISSING_CELL: &str = "—";

/// One table row as the proxy layer delivers it. Columns address fields by
/// name; fields nothing references are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field is present and not JSON null.
    pub fn defined(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Bridge any serializable entity into a table row.
    pub fn from_serialize<T: Serialize>(entity: &T) -> Result<Self> {
        match serde_json::to_value(entity)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(decode_error(format!(
                "expected a JSON object for a table record, got {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Default cell text: strings as-is, scalars via their JSON form, missing
/// and null fields as [`MISSING_CELL`].
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_CELL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Text a field contributes to substring search. Null and missing fields
/// match nothing.
pub fn search_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn display_falls_back_for_missing_and_null() {
        let row = record(json!({ "city": null }));
        assert_eq!(display_value(row.get("city")), MISSING_CELL);
        assert_eq!(display_value(row.get("country")), MISSING_CELL);
    }

    #[test]
    fn display_renders_scalars_like_their_json_form() {
        let row = record(json!({ "clicks": 42, "ratio": 1.5, "active": true, "alias": "promo" }));
        assert_eq!(display_value(row.get("clicks")), "42");
        assert_eq!(display_value(row.get("ratio")), "1.5");
        assert_eq!(display_value(row.get("active")), "true");
        assert_eq!(display_value(row.get("alias")), "promo");
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        assert!(Record::from_serialize(&"just a string").is_err());
        assert!(Record::from_serialize(&json!({ "ok": 1 })).is_ok());
    }

    #[test]
    fn search_text_skips_null() {
        assert_eq!(search_text(&Value::Null), None);
        assert_eq!(search_text(&json!(42)), Some("42".to_string()));
    }
}
