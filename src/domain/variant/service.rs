//! Variant analytics view assembly.

use serde::Serialize;

use crate::domain::model::link_variant::LinkVariant;
use crate::domain::variant::insight::{evaluate, Insight, InsightThresholds};
use crate::domain::variant::metrics::{build_performance, VariantPerformance};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantAnalyticsDto {
    pub performance: VariantPerformance,
    pub insights: Vec<Insight>,
}

/// One-call view model for the variant analytics screen, with default
/// thresholds.
pub fn get_variant_analytics(variants: &[LinkVariant]) -> VariantAnalyticsDto {
    let performance = build_performance(variants);
    let insights = evaluate(&performance, &InsightThresholds::default());
    VariantAnalyticsDto {
        performance,
        insights,
    }
}
