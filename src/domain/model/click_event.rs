//! Raw click events as the backend reports them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::time::parse_timestamp;

/// Category bucket for events with a missing or empty dimension field.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClickEvent {
    pub created_at: String,
    pub alias: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub referrer: Option<String>,
    pub is_bot: bool,
}

impl ClickEvent {
    /// `created_at` stays a raw string so unparseable values still render;
    /// this is the parsed view when one exists.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn created_day(&self) -> Option<NaiveDate> {
        self.created_at_utc().map(|dt| dt.date_naive())
    }

    pub fn alias_label(&self) -> &str {
        label_or_unknown(&self.alias)
    }

    pub fn country_label(&self) -> &str {
        label_or_unknown(&self.country)
    }

    pub fn device_label(&self) -> &str {
        label_or_unknown(&self.device)
    }

    pub fn os_label(&self) -> &str {
        label_or_unknown(&self.os)
    }

    pub fn browser_label(&self) -> &str {
        label_or_unknown(&self.browser)
    }
}

fn label_or_unknown(field: &Option<String>) -> &str {
    match field.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_CATEGORY,
    }
}
