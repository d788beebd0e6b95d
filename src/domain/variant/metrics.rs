//! Variant performance rollup.

use serde::Serialize;

use crate::domain::analytics::pipeline::{conversion_rate, share};
use crate::domain::model::link_variant::LinkVariant;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMetrics {
    pub id: String,
    pub label: String,
    pub weight: f64,
    pub clicks: u64,
    pub conversions: u64,
    pub cvr: f64,
    pub click_share: f64,
    pub conversion_share: f64,
    /// Percentage-point difference against the aggregate CVR.
    pub cvr_delta: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTotals {
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub overall_cvr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPerformance {
    pub totals: VariantTotals,
    pub variants: Vec<VariantMetrics>,
    /// Index into `variants`; first wins ties, `None` when empty.
    pub best_by_clicks: Option<usize>,
    pub best_by_cvr: Option<usize>,
    /// Never zero; bar widths divide by this.
    pub max_clicks: u64,
}

impl VariantPerformance {
    pub fn best_by_clicks(&self) -> Option<&VariantMetrics> {
        self.best_by_clicks.and_then(|i| self.variants.get(i))
    }

    pub fn best_by_cvr(&self) -> Option<&VariantMetrics> {
        self.best_by_cvr.and_then(|i| self.variants.get(i))
    }
}

/// Roll raw variants up into totals and per-variant derived metrics. Every
/// rate is zero-guarded; the input order is preserved so downstream
/// tie-breaks stay deterministic.
pub fn build_performance(variants: &[LinkVariant]) -> VariantPerformance {
    let total_clicks: u64 = variants.iter().map(|v| v.clicks).sum();
    let total_conversions: u64 = variants.iter().map(|v| v.conversions).sum();
    let overall_cvr = conversion_rate(total_clicks, total_conversions);

    let metrics: Vec<VariantMetrics> = variants
        .iter()
        .map(|v| {
            let cvr = v.conversion_rate();
            VariantMetrics {
                id: v.id.clone(),
                label: v.label.clone(),
                weight: v.weight,
                clicks: v.clicks,
                conversions: v.conversions,
                cvr,
                click_share: share(v.clicks, total_clicks),
                conversion_share: share(v.conversions, total_conversions),
                cvr_delta: cvr - overall_cvr,
            }
        })
        .collect();

    let best_by_clicks = best_index(&metrics, |m| m.clicks as f64);
    let best_by_cvr = best_index(&metrics, |m| m.cvr);
    let max_clicks = metrics.iter().map(|m| m.clicks).max().unwrap_or(0).max(1);

    VariantPerformance {
        totals: VariantTotals {
            total_clicks,
            total_conversions,
            overall_cvr,
        },
        variants: metrics,
        best_by_clicks,
        best_by_cvr,
        max_clicks,
    }
}

/// Reduce-style selection: only a strictly greater score replaces the
/// leader, so the first variant in input order wins ties.
fn best_index<F>(metrics: &[VariantMetrics], score: F) -> Option<usize>
where
    F: Fn(&VariantMetrics) -> f64,
{
    let mut best: Option<usize> = None;
    for (idx, metric) in metrics.iter().enumerate() {
        match best {
            None => best = Some(idx),
            Some(leader) if score(metric) > score(&metrics[leader]) => best = Some(idx),
            Some(_) => {}
        }
    }
    best
}
