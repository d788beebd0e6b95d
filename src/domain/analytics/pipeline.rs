//! Grouping and rate primitives shared by every analytics view.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::analytics::bucket::Bucket;
use crate::domain::common::time::day_key;

/// Days of history on link-level charts.
pub const LINK_TREND_DAYS: usize = 30;
/// Days of history on the dashboard overview.
pub const OVERVIEW_TREND_DAYS: usize = 7;

/// Count events per category. Buckets come back sorted by count descending;
/// equal counts keep first-seen input order.
pub fn group_by_category<T, F>(events: &[T], key_fn: F) -> Vec<Bucket>
where
    F: Fn(&T) -> String,
{
    let mut counts: HashMap<String, (usize, u64)> = HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        let entry = counts.entry(key_fn(event)).or_insert((idx, 0));
        entry.1 += 1;
    }

    let mut tagged: Vec<(usize, Bucket)> = counts
        .into_iter()
        .map(|(key, (first_seen, value))| (first_seen, Bucket { key, value }))
        .collect();
    tagged.sort_by(|a, b| b.1.value.cmp(&a.1.value).then(a.0.cmp(&b.0)));

    tagged.into_iter().map(|(_, bucket)| bucket).collect()
}

/// Count events per calendar day, oldest first, keeping the most recent
/// `last_n` days that actually saw events. Events without a derivable date
/// cannot be placed on the axis and are left out.
pub fn group_by_day<T, F>(events: &[T], date_fn: F, last_n: usize) -> Vec<Bucket>
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut skipped = 0usize;

    for event in events {
        match date_fn(event) {
            Some(day) => *days.entry(day).or_default() += 1,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "events without a parseable date left out of day trend");
    }

    let mut buckets: Vec<Bucket> = days
        .into_iter()
        .map(|(day, value)| Bucket {
            key: day_key(day),
            value,
        })
        .collect();

    if buckets.len() > last_n {
        buckets.drain(..buckets.len() - last_n);
    }
    buckets
}

/// Percentage share, zero when the whole is zero.
pub fn share(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    }
}

/// Conversion rate in percent, zero without clicks. Not clamped above 100;
/// conversions exceeding clicks are reported as given.
pub fn conversion_rate(clicks: u64, conversions: u64) -> f64 {
    if clicks > 0 {
        conversions as f64 / clicks as f64 * 100.0
    } else {
        0.0
    }
}

/// The largest `n` buckets after a descending re-sort; ties keep their
/// current order, output length is `min(n, buckets.len())`.
pub fn top_n(buckets: &[Bucket], n: usize) -> Vec<Bucket> {
    let mut sorted = buckets.to_vec();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));
    sorted.truncate(n);
    sorted
}
