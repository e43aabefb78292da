//! Per-episode counters.
//!
//! [`EpisodeMetrics`] tallies what happened during one episode: steps,
//! reward, fish eaten, and feeds broken down by trigger path. The
//! environment keeps the running tally for the current episode and the
//! final tally of the most recently finished one.

use rookery_core::{EpisodeEvent, EpisodeId, FeedSource};

/// Counters for one episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeMetrics {
    /// Which episode these counters belong to.
    pub episode: EpisodeId,
    /// Ticks taken.
    pub steps: u32,
    /// Sum of all rewards, step costs included.
    pub cumulative_reward: f32,
    /// Fish eaten.
    pub fish_eaten: u32,
    /// Feeds delivered by the `feed_radius` distance check.
    pub proximity_feeds: u32,
    /// Feeds delivered by touching the baby.
    pub contact_feeds: u32,
    /// Feeds delivered by a host calling `feed_baby` directly.
    pub direct_feeds: u32,
    /// The episode ended by delivering the last fish.
    pub done: bool,
    /// The episode ended at the step limit.
    pub truncated: bool,
}

impl EpisodeMetrics {
    /// Fresh counters for `episode`.
    pub fn new(episode: EpisodeId) -> Self {
        Self {
            episode,
            ..Self::default()
        }
    }

    /// Total successful feeds over all trigger paths.
    pub fn feeds(&self) -> u32 {
        self.proximity_feeds + self.contact_feeds + self.direct_feeds
    }

    pub(crate) fn record(&mut self, event: &EpisodeEvent) {
        match event {
            EpisodeEvent::FishEaten { .. } => self.fish_eaten += 1,
            EpisodeEvent::BabyFed { source, .. } => match source {
                FeedSource::Proximity => self.proximity_feeds += 1,
                FeedSource::Contact => self.contact_feeds += 1,
                FeedSource::Direct => self.direct_feeds += 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookery_core::FishId;

    #[test]
    fn default_metrics_are_zero() {
        let m = EpisodeMetrics::new(EpisodeId(3));
        assert_eq!(m.episode, EpisodeId(3));
        assert_eq!(m.steps, 0);
        assert_eq!(m.cumulative_reward, 0.0);
        assert_eq!(m.feeds(), 0);
        assert!(!m.done && !m.truncated);
    }

    #[test]
    fn record_splits_feeds_by_source() {
        let mut m = EpisodeMetrics::default();
        m.record(&EpisodeEvent::FishEaten { fish: FishId(0) });
        for source in [FeedSource::Proximity, FeedSource::Contact, FeedSource::Contact] {
            m.record(&EpisodeEvent::BabyFed {
                source,
                remaining_fish: 1,
            });
        }
        assert_eq!(m.fish_eaten, 1);
        assert_eq!(m.proximity_feeds, 1);
        assert_eq!(m.contact_feeds, 2);
        assert_eq!(m.direct_feeds, 0);
        assert_eq!(m.feeds(), 3);
    }
}
