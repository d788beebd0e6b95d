//! Per-link analytics assembly.

use serde::Serialize;

use crate::domain::analytics::bucket::Bucket;
use crate::domain::analytics::pipeline::{
    group_by_category, group_by_day, top_n, LINK_TREND_DAYS,
};
use crate::domain::analytics::service::{build_bot_split, BotSplitDto};
use crate::domain::model::click_event::ClickEvent;

/// Countries shown in the ranking card.
pub const TOP_COUNTRIES_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummaryDto {
    pub total_clicks: usize,
    pub unique_countries: usize,
    /// Raw timestamp of the newest event with a parseable date.
    pub last_event_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalyticsDto {
    pub summary: LinkSummaryDto,
    /// Last thirty active days, oldest first.
    pub click_trend: Vec<Bucket>,
    /// All countries, descending by count.
    pub countries: Vec<Bucket>,
    pub top_countries: Vec<Bucket>,
    pub devices: Vec<Bucket>,
    pub operating_systems: Vec<Bucket>,
    pub browsers: Vec<Bucket>,
    pub bot_split: BotSplitDto,
}

/// Build the per-link analytics view. When the event list is an externally
/// paged window, `total_clicks` carries the backend's full count; `None`
/// counts the events given.
pub fn get_link_analytics(events: &[ClickEvent], total_clicks: Option<usize>) -> LinkAnalyticsDto {
    let countries = group_by_category(events, |e| e.country_label().to_string());

    let summary = LinkSummaryDto {
        total_clicks: total_clicks.unwrap_or(events.len()),
        unique_countries: countries.len(),
        last_event_at: last_event_at(events),
    };

    LinkAnalyticsDto {
        summary,
        click_trend: group_by_day(events, |e| e.created_day(), LINK_TREND_DAYS),
        top_countries: top_n(&countries, TOP_COUNTRIES_LIMIT),
        countries,
        devices: group_by_category(events, |e| e.device_label().to_string()),
        operating_systems: group_by_category(events, |e| e.os_label().to_string()),
        browsers: group_by_category(events, |e| e.browser_label().to_string()),
        bot_split: build_bot_split(events),
    }
}

fn last_event_at(events: &[ClickEvent]) -> Option<String> {
    events
        .iter()
        .filter_map(|e| e.created_at_utc().map(|dt| (dt, &e.created_at)))
        .max_by_key(|(dt, _)| *dt)
        .map(|(_, raw)| raw.clone())
}
