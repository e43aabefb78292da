//! Simulation engine for the Rookery penguin feeding environment.
//!
//! Provides [`PenguinEnv`], the lockstep driver for one training area,
//! and [`BatchedEnv`], which steps many of them against one shared
//! curriculum. The [`area`] module holds the episode controller that
//! places entities and applies the eat/feed rules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod batched;
pub mod config;
pub mod effects;
pub mod env;
pub mod fish;
pub mod metrics;
pub mod penguin;

pub use area::{Area, Baby, Contact, Contacts};
pub use batched::{BatchError, BatchedEnv};
pub use config::{AreaConfig, ConfigError, EnvConfig, FeedTrigger};
pub use effects::{Effect, EffectKind, Effects};
pub use env::{EnvError, PenguinEnv};
pub use fish::Fish;
pub use metrics::EpisodeMetrics;
pub use penguin::{Penguin, PenguinState, EAT_REWARD, FEED_REWARD};
