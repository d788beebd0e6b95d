//! Deterministic qualitative flags over variant performance.

use std::fmt;

use serde::Serialize;

use crate::domain::variant::metrics::VariantPerformance;

/// Total clicks under this make every rate suspect.
pub const LOW_SAMPLE_CLICKS: u64 = 100;
/// Relative CVR uplift over the aggregate worth calling out.
pub const OUTPERFORMANCE_RATIO: f64 = 1.2;
/// Per-variant click floor under which shares are unstable.
pub const SPARSE_CLICK_FLOOR: u64 = 10;
/// Allowed gap, in percentage points, between configured weight and
/// observed click share.
pub const WEIGHT_DRIFT_POINTS: f64 = 10.0;

/// Rule thresholds, defaulting to the named constants so tests can assert
/// exact boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    pub low_sample_clicks: u64,
    pub outperformance_ratio: f64,
    pub sparse_click_floor: u64,
    pub weight_drift_points: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            low_sample_clicks: LOW_SAMPLE_CLICKS,
            outperformance_ratio: OUTPERFORMANCE_RATIO,
            sparse_click_floor: SPARSE_CLICK_FLOOR,
            weight_drift_points: WEIGHT_DRIFT_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Insight {
    #[serde(rename_all = "camelCase")]
    LowSample { total_clicks: u64 },
    #[serde(rename_all = "camelCase")]
    Outperformance { label: String, uplift_percent: f64 },
    #[serde(rename_all = "camelCase")]
    SparseVariants { labels: Vec<String> },
    #[serde(rename_all = "camelCase")]
    WeightTrafficMismatch {
        label: String,
        click_share: f64,
        weight: f64,
    },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::LowSample { total_clicks } => write!(
                f,
                "Only {total_clicks} clicks so far; results are not statistically meaningful yet"
            ),
            Insight::Outperformance {
                label,
                uplift_percent,
            } => write!(
                f,
                "Variant {label} is converting {uplift_percent:.0}% above the average"
            ),
            Insight::SparseVariants { labels } => write!(
                f,
                "Variants with very few clicks: {}",
                labels.join(", ")
            ),
            Insight::WeightTrafficMismatch {
                label,
                click_share,
                weight,
            } => write!(
                f,
                "Variant {label} receives {click_share:.1}% of clicks against a configured {weight:.0}% weight"
            ),
        }
    }
}

/// Evaluate every rule independently; no rule short-circuits another. An
/// empty variant set produces no insights at all.
pub fn evaluate(perf: &VariantPerformance, thresholds: &InsightThresholds) -> Vec<Insight> {
    if perf.variants.is_empty() {
        return Vec::new();
    }

    [
        low_sample(perf, thresholds),
        outperformance(perf, thresholds),
        sparse_variants(perf, thresholds),
        weight_traffic_mismatch(perf, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Fires strictly below the threshold; exactly at it does not trigger.
fn low_sample(perf: &VariantPerformance, t: &InsightThresholds) -> Option<Insight> {
    (perf.totals.total_clicks < t.low_sample_clicks).then(|| Insight::LowSample {
        total_clicks: perf.totals.total_clicks,
    })
}

/// Fires when the best CVR exceeds the aggregate by more than the ratio.
/// A positive CVR forces a positive aggregate, so the uplift division is
/// well-defined whenever the rule fires.
fn outperformance(perf: &VariantPerformance, t: &InsightThresholds) -> Option<Insight> {
    let best = perf.best_by_cvr()?;
    let overall = perf.totals.overall_cvr;
    if best.cvr > overall * t.outperformance_ratio && best.cvr > 0.0 {
        Some(Insight::Outperformance {
            label: best.label.clone(),
            uplift_percent: (best.cvr / overall - 1.0) * 100.0,
        })
    } else {
        None
    }
}

fn sparse_variants(perf: &VariantPerformance, t: &InsightThresholds) -> Option<Insight> {
    let labels: Vec<String> = perf
        .variants
        .iter()
        .filter(|m| m.clicks < t.sparse_click_floor)
        .map(|m| m.label.clone())
        .collect();
    (!labels.is_empty()).then(|| Insight::SparseVariants { labels })
}

/// Compares the top-clicked variant's observed share with its configured
/// weight.
fn weight_traffic_mismatch(perf: &VariantPerformance, t: &InsightThresholds) -> Option<Insight> {
    let top = perf.best_by_clicks()?;
    let drift = (top.click_share - top.weight).abs();
    (drift > t.weight_drift_points).then(|| Insight::WeightTrafficMismatch {
        label: top.label.clone(),
        click_share: top.click_share,
        weight: top.weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::link_variant::LinkVariant;
    use crate::domain::variant::metrics::build_performance;

    fn variant(label: &str, weight: f64, clicks: u64, conversions: u64) -> LinkVariant {
        LinkVariant {
            label: label.to_string(),
            weight,
            clicks,
            conversions,
            ..LinkVariant::default()
        }
    }

    fn evaluate_default(variants: &[LinkVariant]) -> Vec<Insight> {
        evaluate(&build_performance(variants), &InsightThresholds::default())
    }

    #[test]
    fn exactly_one_hundred_clicks_is_not_low_sample() {
        // Aggregate CVR 9.0; A's 10.0 is below the 10.8 uplift bar, and
        // neither variant is sparse, so nothing fires.
        let insights = evaluate_default(&[
            variant("A", 50.0, 80, 8),
            variant("B", 50.0, 20, 1),
        ]);
        assert!(!insights
            .iter()
            .any(|i| matches!(i, Insight::LowSample { .. })));
        assert!(!insights
            .iter()
            .any(|i| matches!(i, Insight::Outperformance { .. })));
    }

    #[test]
    fn ninety_nine_clicks_is_low_sample() {
        let insights = evaluate_default(&[
            variant("A", 50.0, 80, 8),
            variant("B", 50.0, 19, 1),
        ]);
        assert!(insights
            .iter()
            .any(|i| matches!(i, Insight::LowSample { total_clicks: 99 })));
    }

    #[test]
    fn outperformance_requires_strictly_more_than_the_ratio() {
        // Aggregate CVR 10.0, bar at 12.0. A's CVR 12.0 does not fire.
        let at_bar = evaluate_default(&[
            variant("A", 50.0, 100, 12),
            variant("B", 50.0, 100, 8),
        ]);
        assert!(!at_bar
            .iter()
            .any(|i| matches!(i, Insight::Outperformance { .. })));

        // A's CVR 13.0 clears the 12.6 bar (aggregate 10.5).
        let above = evaluate_default(&[
            variant("A", 50.0, 100, 13),
            variant("B", 50.0, 100, 8),
        ]);
        let hit = above
            .iter()
            .find_map(|i| match i {
                Insight::Outperformance {
                    label,
                    uplift_percent,
                } => Some((label.clone(), *uplift_percent)),
                _ => None,
            })
            .expect("outperformance should fire");
        assert_eq!(hit.0, "A");
        assert!((hit.1 - (13.0 / 10.5 - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn sparse_variants_lists_everyone_under_the_floor() {
        let insights = evaluate_default(&[
            variant("A", 40.0, 120, 6),
            variant("B", 30.0, 9, 0),
            variant("C", 30.0, 3, 0),
        ]);
        let labels = insights
            .iter()
            .find_map(|i| match i {
                Insight::SparseVariants { labels } => Some(labels.clone()),
                _ => None,
            })
            .expect("sparse rule should fire");
        assert_eq!(labels, vec!["B", "C"]);
    }

    #[test]
    fn weight_mismatch_uses_the_top_clicked_variant() {
        // A takes ~90.9% of clicks on a 50% weight: fires.
        let insights = evaluate_default(&[
            variant("A", 50.0, 500, 10),
            variant("B", 50.0, 50, 1),
        ]);
        assert!(insights.iter().any(|i| matches!(
            i,
            Insight::WeightTrafficMismatch { label, .. } if label == "A"
        )));

        // 55% observed on a 50% weight is inside the 10-point band.
        let inside = evaluate_default(&[
            variant("A", 50.0, 55, 1),
            variant("B", 50.0, 45, 1),
        ]);
        assert!(!inside
            .iter()
            .any(|i| matches!(i, Insight::WeightTrafficMismatch { .. })));
    }

    #[test]
    fn rules_are_independent_and_can_stack() {
        // 40 total clicks, B sparse, A outperforming and over-weighted.
        let insights = evaluate_default(&[
            variant("A", 50.0, 35, 7),
            variant("B", 50.0, 5, 0),
        ]);
        assert!(insights.len() >= 3);
        assert!(insights
            .iter()
            .any(|i| matches!(i, Insight::LowSample { .. })));
        assert!(insights
            .iter()
            .any(|i| matches!(i, Insight::Outperformance { .. })));
        assert!(insights
            .iter()
            .any(|i| matches!(i, Insight::SparseVariants { .. })));
    }

    #[test]
    fn no_variants_means_no_insights() {
        assert!(evaluate_default(&[]).is_empty());
    }

    #[test]
    fn custom_thresholds_shift_the_boundaries() {
        let perf = build_performance(&[
            variant("A", 50.0, 30, 3),
            variant("B", 50.0, 20, 2),
        ]);
        let relaxed = InsightThresholds {
            low_sample_clicks: 10,
            sparse_click_floor: 1,
            ..InsightThresholds::default()
        };
        let insights = evaluate(&perf, &relaxed);
        assert!(!insights
            .iter()
            .any(|i| matches!(i, Insight::LowSample { .. })));
        assert!(!insights
            .iter()
            .any(|i| matches!(i, Insight::SparseVariants { .. })));
    }
}
