//! Timestamp handling for raw backend payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Lenient parse for the timestamp strings the backend and older exports
/// emit. RFC 3339 first, then the date-time and bare-date fallbacks.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

/// Calendar day of a raw timestamp, when one can be derived at all.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date_naive())
}

/// Axis key used by day-bucketed charts.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Display form of a raw timestamp. Values that cannot be parsed come back
/// unchanged so the screen still shows what the backend sent.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}
