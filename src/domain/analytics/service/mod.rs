//! Per-screen analytics view models.

pub mod link_service;
pub mod overview_service;

use serde::Serialize;

use crate::domain::analytics::pipeline::share;
use crate::domain::model::click_event::ClickEvent;

/// Human/bot counts with percentage shares of the whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSplitDto {
    pub human: u64,
    pub bot: u64,
    pub human_share: f64,
    pub bot_share: f64,
}

pub fn build_bot_split(events: &[ClickEvent]) -> BotSplitDto {
    let total = events.len() as u64;
    let bot = events.iter().filter(|e| e.is_bot).count() as u64;
    let human = total - bot;

    BotSplitDto {
        human,
        bot,
        human_share: share(human, total),
        bot_share: share(bot, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_counts_and_shares() {
        let events = vec![
            ClickEvent { is_bot: true, ..ClickEvent::default() },
            ClickEvent::default(),
            ClickEvent::default(),
            ClickEvent::default(),
        ];
        let split = build_bot_split(&events);
        assert_eq!(split.bot, 1);
        assert_eq!(split.human, 3);
        assert_eq!(split.bot_share, 25.0);
        assert_eq!(split.human_share, 75.0);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let split = build_bot_split(&[]);
        assert_eq!(split.bot, 0);
        assert_eq!(split.human_share, 0.0);
    }
}
