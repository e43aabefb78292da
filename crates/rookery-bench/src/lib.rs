//! Benchmark profiles and utilities for the Rookery environment.
//!
//! Provides pre-built [`EnvConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: the default scene, four fish
//! - [`stress_profile`]: a wide area with 64 fish
//! - [`random_actions`]: a deterministic action stream via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rookery_core::{Action, Turn, Wedge};
use rookery_curriculum::{CurriculumParameters, FEED_RADIUS, FISH_SPEED};
use rookery_engine::EnvConfig;

/// The default scene with a fixed seed.
pub fn reference_profile(seed: u64) -> EnvConfig {
    EnvConfig::with_seed(seed)
}

/// 64 fish spread over a 40-unit area, with a long step limit.
///
/// Contact detection scans every fish each tick, so this profile shows
/// how tick cost grows with population.
pub fn stress_profile(seed: u64) -> EnvConfig {
    let mut config = EnvConfig {
        max_steps: 20_000,
        ..EnvConfig::with_seed(seed)
    };
    config.area.penguin_wedge = Wedge::new(0.0, 360.0, 0.0, 30.0);
    config.area.fish_wedge = Wedge::new(0.0, 360.0, 2.0, 40.0);
    config.area.fish_swim_wedge = Wedge::new(0.0, 360.0, 2.0, 40.0);
    config.area.fish_count = 64;
    config
}

/// Curriculum at its hardest: swimming fish, contact-only feeding.
pub fn swimming_params() -> CurriculumParameters {
    CurriculumParameters::with_values([(FISH_SPEED, 1.0), (FEED_RADIUS, 0.0)])
}

/// `n` pseudo-random actions, identical for identical seeds.
pub fn random_actions(n: usize, seed: u64) -> Vec<Action> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let throttle = rng.random_range(0.0..=1.0);
            let turn = match rng.random_range(0..3u8) {
                1 => Turn::Left,
                2 => Turn::Right,
                _ => Turn::Straight,
            };
            Action::new(throttle, turn)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile(42).validate().unwrap();
    }

    #[test]
    fn random_actions_are_deterministic() {
        let a = random_actions(50, 7);
        assert_eq!(a, random_actions(50, 7));
        assert_ne!(a, random_actions(50, 8));
        assert!(a.iter().all(|x| (0.0..=1.0).contains(&x.throttle)));
    }
}
