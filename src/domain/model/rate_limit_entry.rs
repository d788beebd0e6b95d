//! Active rate-limit windows as the backend reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::time::parse_timestamp;

/// One active quota window. The entry disappears from the next poll once the
/// window expires or an operator resets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateLimitEntry {
    /// Composite key, e.g. `ip:203.0.113.5` or `link:promo`.
    pub key: String,
    pub count: u64,
    pub expires_at: String,
}

impl RateLimitEntry {
    /// Parsed expiry. `None` for malformed input, which downstream treats
    /// as already expired.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_payload() {
        let entry: RateLimitEntry = serde_json::from_value(json!({
            "key": "ip:203.0.113.5",
            "count": 12,
            "expiresAt": "2024-06-01T00:00:30Z"
        }))
        .expect("decode should succeed");

        assert_eq!(entry.key, "ip:203.0.113.5");
        assert_eq!(entry.count, 12);
        assert!(entry.expires_at_utc().is_some());
    }

    #[test]
    fn malformed_expiry_parses_to_none() {
        let entry = RateLimitEntry {
            expires_at: "soon".to_string(),
            ..RateLimitEntry::default()
        };
        assert_eq!(entry.expires_at_utc(), None);
    }
}
