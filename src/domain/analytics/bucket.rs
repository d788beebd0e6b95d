//! Chart bucket DTO.

use serde::{Deserialize, Serialize};

/// One aggregated key/value pair. Day buckets keep chronological order,
/// categorical buckets descending counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub value: u64,
}

impl Bucket {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}
