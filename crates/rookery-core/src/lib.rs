//! Core types and traits for the Rookery penguin feeding environment.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: identifiers, the
//! action and observation encodings, wedge geometry for spawning, per-tick
//! step results, and the [`Environment`] trait that drivers call into.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod geometry;
pub mod id;
pub mod observation;
pub mod step;
pub mod traits;

pub use action::{Action, HeuristicInput, Turn, ACTION_LEN};
pub use error::ActionError;
pub use geometry::{choose_random_position, forward_from_yaw, Wedge, FORWARD, UP};
pub use id::{EpisodeId, FishId, ParameterVersion, TickId};
pub use observation::{Observation, OBSERVATION_LEN};
pub use step::{EpisodeEvent, FeedSource, StepEvents, StepResult};
pub use traits::Environment;
