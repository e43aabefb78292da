//! Rookery: a penguin feeding environment for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Rookery sub-crates. For most users, adding `rookery` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rookery::prelude::*;
//!
//! let params = CurriculumParameters::new();
//! let mut env = PenguinEnv::new(EnvConfig::with_seed(42), params.clone()).unwrap();
//!
//! // Swim the fish from the next episode on.
//! params.set(FISH_SPEED, 0.5);
//! env.reset(7);
//! assert!(env.area().fish().all(|f| f.speed() == 0.5));
//!
//! let result = env.step(Action::new(1.0, Turn::Left)).unwrap();
//! assert_eq!(result.observation.as_slice().len(), OBSERVATION_LEN);
//! assert_eq!(result.tick, rookery::types::TickId(1));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rookery-core` | IDs, actions, observations, wedge geometry, the `Environment` trait |
//! | [`curriculum`] | `rookery-curriculum` | Shared curriculum parameter table |
//! | [`engine`] | `rookery-engine` | Area controller, lockstep and batched environments |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`rookery-core`).
///
/// Contains identifiers, the [`types::Action`] and [`types::Observation`]
/// encodings, [`types::Wedge`] spawn regions, and the
/// [`types::Environment`] trait.
pub use rookery_core as types;

/// Shared curriculum parameters (`rookery-curriculum`).
pub use rookery_curriculum as curriculum;

/// Simulation engine (`rookery-engine`).
///
/// [`engine::PenguinEnv`] for one area stepped in lockstep,
/// [`engine::BatchedEnv`] for many areas sharing one curriculum.
pub use rookery_engine as engine;

/// Common imports for typical Rookery usage.
///
/// ```rust
/// use rookery::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use rookery_core::{
        Action, Environment, EpisodeEvent, FeedSource, FishId, HeuristicInput, Observation,
        StepResult, Turn, Wedge, ACTION_LEN, OBSERVATION_LEN,
    };

    // Errors
    pub use rookery_core::ActionError;
    pub use rookery_engine::{BatchError, ConfigError, EnvError};

    // Curriculum
    pub use rookery_curriculum::{CurriculumParameters, ParameterSnapshot, FEED_RADIUS, FISH_SPEED};

    // Engine
    pub use rookery_engine::{
        AreaConfig, BatchedEnv, EnvConfig, EpisodeMetrics, FeedTrigger, PenguinEnv,
    };
}
