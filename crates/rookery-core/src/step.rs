//! Per-tick step results and the events that produced them.

use smallvec::SmallVec;

use crate::id::{FishId, TickId};
use crate::observation::Observation;

/// Which trigger path delivered a feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedSource {
    /// Per-tick distance check against `feed_radius`.
    Proximity,
    /// Penguin began touching the baby this tick.
    Contact,
    /// Called directly by a host driving its own physics.
    Direct,
}

/// Something that changed the reward or the episode state during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EpisodeEvent {
    /// The penguin ate a fish.
    FishEaten {
        /// The fish that was removed.
        fish: FishId,
    },
    /// The penguin fed the baby.
    BabyFed {
        /// Trigger path that caused the feed.
        source: FeedSource,
        /// Live fish left after the feed.
        remaining_fish: usize,
    },
}

/// Events recorded during one tick. At most one eat and one feed can
/// succeed per tick, so this never spills to the heap.
pub type StepEvents = SmallVec<[EpisodeEvent; 4]>;

/// Outcome of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Tick number within the episode (1 after the first step).
    pub tick: TickId,
    /// Observation of the post-tick state.
    pub observation: Observation,
    /// Reward accrued during this tick, step cost included.
    pub reward: f32,
    /// Running sum of rewards since the episode started.
    pub cumulative_reward: f32,
    /// The final fish was delivered; the episode is over.
    pub done: bool,
    /// The step limit was reached before the episode finished.
    pub truncated: bool,
    /// What happened during this tick.
    pub events: StepEvents,
}

impl StepResult {
    /// Whether the driver must reset before stepping again.
    pub fn is_terminal(&self) -> bool {
        self.done || self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn terminal_when_done_or_truncated() {
        let mut result = StepResult {
            tick: TickId(1),
            observation: Observation::default(),
            reward: 0.0,
            cumulative_reward: 0.0,
            done: false,
            truncated: false,
            events: smallvec![EpisodeEvent::FishEaten { fish: FishId(0) }],
        };
        assert!(!result.is_terminal());
        result.truncated = true;
        assert!(result.is_terminal());
        result.truncated = false;
        result.done = true;
        assert!(result.is_terminal());
        assert!(!result.events.spilled());
    }
}
