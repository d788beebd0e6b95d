//! Rate-limit panel view assembly.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::domain::model::rate_limit_entry::RateLimitEntry;
use crate::domain::ratelimit::key::{
    parse_key, time_remaining, RateLimitKey, EXPIRED, KEY_TYPE_IP, KEY_TYPE_LINK,
};

/// Poll cadence for the live limiter snapshot.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Key-scope filter for the panel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTypeFilter {
    #[default]
    All,
    Ip,
    Link,
}

impl KeyTypeFilter {
    fn accepts(&self, kind: &str) -> bool {
        match self {
            KeyTypeFilter::All => true,
            KeyTypeFilter::Ip => kind == KEY_TYPE_IP,
            KeyTypeFilter::Link => kind == KEY_TYPE_LINK,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRowDto {
    pub key: String,
    pub parsed: RateLimitKey,
    pub count: u64,
    pub expires_at: String,
    pub remaining: String,
}

/// Header-card tallies. `total` spans the whole snapshot; the scope counts
/// cover only the rows currently shown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitCountsDto {
    pub total: usize,
    pub ip_count: usize,
    pub link_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitViewDto {
    pub rows: Vec<RateLimitRowDto>,
    pub counts: RateLimitCountsDto,
}

/// Build the panel view for one limiter snapshot.
///
/// The row list narrows by scope filter first, then by the search needle
/// against the parsed value or the full composite key. The per-scope tallies
/// follow the surviving rows; only `total` spans the whole snapshot.
pub fn get_rate_limit_view(
    entries: &[RateLimitEntry],
    filter: KeyTypeFilter,
    query: &str,
    now: DateTime<Utc>,
) -> RateLimitViewDto {
    // --- Filtered rows ---
    let needle = query.to_lowercase();
    let mut rows = Vec::new();
    for entry in entries {
        let parsed = parse_key(&entry.key);
        if !filter.accepts(&parsed.kind) {
            continue;
        }
        if !needle.is_empty()
            && !parsed.value.to_lowercase().contains(&needle)
            && !entry.key.to_lowercase().contains(&needle)
        {
            continue;
        }

        let remaining = match entry.expires_at_utc() {
            Some(expires) => time_remaining(expires, now),
            None => {
                warn!(
                    key = %entry.key,
                    expires_at = %entry.expires_at,
                    "unparseable expiry, treating as expired"
                );
                EXPIRED.to_string()
            }
        };

        rows.push(RateLimitRowDto {
            key: entry.key.clone(),
            parsed,
            count: entry.count,
            expires_at: entry.expires_at.clone(),
            remaining,
        });
    }

    // --- Scope tallies over the surviving rows ---
    let mut ip_count = 0;
    let mut link_count = 0;
    for row in &rows {
        match row.parsed.kind.as_str() {
            KEY_TYPE_IP => ip_count += 1,
            KEY_TYPE_LINK => link_count += 1,
            _ => {}
        }
    }

    RateLimitViewDto {
        rows,
        counts: RateLimitCountsDto {
            total: entries.len(),
            ip_count,
            link_count,
        },
    }
}
