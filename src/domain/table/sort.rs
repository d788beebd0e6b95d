//! Tri-state column sorting.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::record::Record;
use crate::domain::common::time::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort state of one table. `Unsorted` is the resting point of the
/// three-click cycle; an active sort always carries both key and direction,
/// so a direction without a key cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Active { key: String, direction: SortDirection },
}

impl SortState {
    /// Advance the cycle for a header click: a new column starts ascending,
    /// a second click flips to descending, a third returns to unsorted.
    #[must_use]
    pub fn cycle(&self, clicked: &str) -> SortState {
        match self {
            SortState::Active { key, direction } if key == clicked => match direction {
                SortDirection::Asc => SortState::Active {
                    key: key.clone(),
                    direction: SortDirection::Desc,
                },
                SortDirection::Desc => SortState::Unsorted,
            },
            _ => SortState::Active {
                key: clicked.to_string(),
                direction: SortDirection::Asc,
            },
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            SortState::Active { key, .. } => Some(key),
            SortState::Unsorted => None,
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Active { direction, .. } => Some(*direction),
            SortState::Unsorted => None,
        }
    }
}

/// Sort records on `key`. Missing and null values land last in both
/// directions; only the defined-value comparison follows `direction`. The
/// underlying sort is stable, so pairs with no derivable order keep their
/// input positions.
pub fn sort_records(records: &mut [Record], key: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        match (a.defined(key), b.defined(key)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(av), Some(bv)) => {
                let ord = compare_values(av, bv);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    });
}

/// Ascending comparison of two defined field values. Strings compare
/// case-insensitively with a case-sensitive tiebreak, numbers numerically;
/// anything else falls back to parsed timestamps when both sides yield one,
/// and compares equal otherwise.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => compare_strings(a, b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        _ => match (timestamp_value(a), timestamp_value(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        },
    }
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Timestamp reading of a value for cross-type comparison. Numbers are
/// epoch milliseconds.
fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
