//! Dashboard overview assembly.

use serde::Serialize;

use crate::domain::analytics::bucket::Bucket;
use crate::domain::analytics::pipeline::{
    group_by_category, group_by_day, top_n, OVERVIEW_TREND_DAYS,
};
use crate::domain::analytics::service::{build_bot_split, BotSplitDto};
use crate::domain::model::click_event::ClickEvent;

/// Events shown in the activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
/// Aliases shown on the leaderboard.
pub const TOP_LINKS_LIMIT: usize = 10;

/// Entity counts the proxy already holds from its list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewTotals {
    pub total_links: usize,
    pub total_nodes: usize,
    pub active_nodes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStatsDto {
    pub total_links: usize,
    pub total_nodes: usize,
    pub active_nodes: usize,
    pub total_clicks: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub stats: OverviewStatsDto,
    /// Last seven active days, oldest first.
    pub click_trend: Vec<Bucket>,
    pub device_breakdown: Vec<Bucket>,
    pub browser_breakdown: Vec<Bucket>,
    pub bot_split: BotSplitDto,
    /// Top aliases by click count, descending.
    pub top_links: Vec<Bucket>,
    /// Last events, newest first.
    pub recent_activity: Vec<ClickEvent>,
}

pub fn get_overview(events: &[ClickEvent], totals: OverviewTotals) -> OverviewDto {
    let stats = OverviewStatsDto {
        total_links: totals.total_links,
        total_nodes: totals.total_nodes,
        active_nodes: totals.active_nodes,
        total_clicks: events.len(),
    };

    let by_alias = group_by_category(events, |e| e.alias_label().to_string());

    let recent_start = events.len().saturating_sub(RECENT_ACTIVITY_LIMIT);
    let mut recent_activity = events[recent_start..].to_vec();
    recent_activity.reverse();

    OverviewDto {
        stats,
        click_trend: group_by_day(events, |e| e.created_day(), OVERVIEW_TREND_DAYS),
        device_breakdown: group_by_category(events, |e| e.device_label().to_string()),
        browser_breakdown: group_by_category(events, |e| e.browser_label().to_string()),
        bot_split: build_bot_split(events),
        top_links: top_n(&by_alias, TOP_LINKS_LIMIT),
        recent_activity,
    }
}
