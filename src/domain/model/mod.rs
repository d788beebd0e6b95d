//! Typed shapes for the JSON collections the proxy layer fetches.

pub mod click_event;
pub mod link_variant;
pub mod rate_limit_entry;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Result;

/// Decode a fetched JSON array into typed entities. Unknown fields are
/// ignored; missing optional fields take their defaults.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    Ok(serde_json::from_value(value)?)
}

/// Same decode straight from a raw response body.
pub fn decode_list_str<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(raw)?)
}
