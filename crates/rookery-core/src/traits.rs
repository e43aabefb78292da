//! The driver-facing environment contract.

use crate::action::Action;
use crate::observation::Observation;
use crate::step::StepResult;

/// An episodic environment driven by an external loop.
///
/// The driver calls [`on_episode_start`](Environment::on_episode_start)
/// at every episode boundary, then alternates
/// [`compute_observations`](Environment::compute_observations) and
/// [`on_tick`](Environment::on_tick) until the returned
/// [`StepResult`] is terminal.
pub trait Environment {
    /// Error returned when the driver misuses the environment.
    type Error: std::error::Error;

    /// Reset the world for a new episode and return the first observation.
    fn on_episode_start(&mut self) -> Observation;

    /// Apply one action and advance the world by one tick.
    fn on_tick(&mut self, action: Action) -> Result<StepResult, Self::Error>;

    /// Observe the current state. Always recomputed from live state.
    fn compute_observations(&self) -> Observation;
}
