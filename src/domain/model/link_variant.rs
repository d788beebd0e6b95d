//! Weighted link variants for split testing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkVariant {
    /// Backend-assigned opaque id, e.g. `var-20240201103000`.
    pub id: String,
    pub label: String,
    pub target_url: String,
    /// Traffic weight in percent, nominally 0..=100. Not renormalized here.
    pub weight: f64,
    pub clicks: u64,
    pub conversions: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl LinkVariant {
    /// Conversion rate in percent, zero for a variant with no clicks.
    /// Values above 100 pass through unclamped.
    pub fn conversion_rate(&self) -> f64 {
        if self.clicks > 0 {
            self.conversions as f64 / self.clicks as f64 * 100.0
        } else {
            0.0
        }
    }
}
