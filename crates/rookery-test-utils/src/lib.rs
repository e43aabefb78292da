//! Test fixtures and scripted policies for Rookery development.
//!
//! Provides deterministic configurations ([`quiet_config`]), curriculum
//! shortcuts ([`params_with`]), a hook-driven episode runner
//! ([`feed_everything`]), and policies that drive a [`PenguinEnv`]
//! through its public API only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{steer_toward, GreedyPolicy, ScriptedPolicy};

use rookery_core::{EpisodeEvent, FishId, Wedge};
use rookery_curriculum::{CurriculumParameters, FEED_RADIUS, FISH_SPEED};
use rookery_engine::{EnvConfig, PenguinEnv};

/// Default config whose penguin spawns exactly at the area center.
///
/// Every fish spawns at least 2 units away and the baby at least 4, so
/// an idle penguin touches nothing and earns nothing but step costs.
pub fn quiet_config(seed: u64) -> EnvConfig {
    let mut config = EnvConfig::with_seed(seed);
    config.area.penguin_wedge = Wedge::point(0.0, 0.0);
    config
}

/// Curriculum preloaded with both known parameters.
pub fn params_with(fish_speed: f32, feed_radius: f32) -> CurriculumParameters {
    CurriculumParameters::with_values([(FISH_SPEED, fish_speed), (FEED_RADIUS, feed_radius)])
}

/// Build an environment, panicking on an invalid config.
pub fn make_env(config: EnvConfig, params: CurriculumParameters) -> PenguinEnv {
    PenguinEnv::new(config, params).expect("test config must be valid")
}

/// Live fish ids in spawn order.
pub fn fish_ids(env: &PenguinEnv) -> Vec<FishId> {
    env.area().fish().map(|f| f.id()).collect()
}

/// Eat and deliver every live fish through the host hooks.
///
/// Returns the events in the order they happened. The episode is done
/// afterwards.
pub fn feed_everything(env: &mut PenguinEnv) -> Vec<EpisodeEvent> {
    let mut events = Vec::new();
    for id in fish_ids(env) {
        events.extend(env.on_fish_collision(id));
        events.extend(env.feed_baby());
    }
    events
}
