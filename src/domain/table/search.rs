//! Substring search across configured record fields.

use crate::domain::common::record::{search_text, Record};

/// Search box state of one table: the live query plus the fields it reaches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub keys: Vec<String>,
}

impl SearchState {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            query: String::new(),
            keys,
        }
    }
}

/// Case-insensitive OR match: the record stays if any configured key's
/// stringified value contains the query. An empty query keeps everything.
pub fn matches(record: &Record, query: &str, keys: &[String]) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    keys.iter().any(|key| {
        record
            .get(key)
            .and_then(search_text)
            .map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

/// Filtered copy of the working set; the input is untouched.
pub fn filter_records(records: &[Record], query: &str, keys: &[String]) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(record, query, keys))
        .cloned()
        .collect()
}
