//! Composite limiter keys and TTL countdowns.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Key scope prefixes the limiter writes.
pub const KEY_TYPE_IP: &str = "ip";
pub const KEY_TYPE_LINK: &str = "link";
/// Scope reported when the composite prefix is missing.
pub const UNKNOWN_KEY_TYPE: &str = "unknown";

/// Countdown text once a window has closed.
pub const EXPIRED: &str = "Expired";

/// Parsed form of a composite limiter key like `ip:203.0.113.5` or
/// `link:promo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Split on the first `:`. Keys without one come back whole under the
/// `unknown` type.
pub fn parse_key(key: &str) -> RateLimitKey {
    match key.split_once(':') {
        Some((kind, value)) => RateLimitKey {
            kind: kind.to_string(),
            value: value.to_string(),
        },
        None => RateLimitKey {
            kind: UNKNOWN_KEY_TYPE.to_string(),
            value: key.to_string(),
        },
    }
}

/// Human countdown to `expires_at`: the largest applicable unit pair, no
/// fractions. Anything at or before `now` reads [`EXPIRED`].
pub fn time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = expires_at - now;
    if diff <= Duration::zero() {
        return EXPIRED.to_string();
    }

    let seconds = diff.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
