//! The learning agent: movement, reward accounting, and the
//! seeking/carrying state machine.

use glam::Vec3;
use rookery_core::geometry::normalize_yaw;
use rookery_core::{forward_from_yaw, Action, Observation};

/// Reward for swallowing a fish.
pub const EAT_REWARD: f32 = 1.0;

/// Reward for delivering a fish to the baby.
pub const FEED_REWARD: f32 = 1.0;

/// Whether the penguin has food in its beak.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PenguinState {
    /// Looking for a fish.
    #[default]
    Seeking,
    /// Carrying a fish back to the baby.
    Carrying,
}

/// Penguin state owned by its [`Area`](crate::area::Area).
///
/// Persists across episodes: a reset repositions it and clears its
/// per-episode counters rather than creating a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Penguin {
    position: Vec3,
    yaw: f32,
    state: PenguinState,
    cumulative_reward: f32,
    tick_reward: f32,
    step_count: u32,
    done: bool,
}

impl Penguin {
    pub(crate) fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            state: PenguinState::Seeking,
            cumulative_reward: 0.0,
            tick_reward: 0.0,
            step_count: 0,
            done: false,
        }
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading in degrees, in `[0, 360)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Unit facing vector.
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Current state-machine state.
    pub fn state(&self) -> PenguinState {
        self.state
    }

    /// Whether the penguin is carrying food.
    pub fn is_carrying(&self) -> bool {
        self.state == PenguinState::Carrying
    }

    /// Sum of all rewards since the episode started.
    pub fn cumulative_reward(&self) -> f32 {
        self.cumulative_reward
    }

    /// Ticks taken this episode.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Whether the final fish has been delivered.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Observe the baby at `baby` from the penguin's current pose.
    pub fn observe(&self, baby: Vec3) -> Observation {
        Observation::new(self.is_carrying(), self.position, self.forward(), baby)
    }

    pub(crate) fn place(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.yaw = normalize_yaw(yaw);
    }

    pub(crate) fn begin_episode(&mut self) {
        self.state = PenguinState::Seeking;
        self.cumulative_reward = 0.0;
        self.tick_reward = 0.0;
        self.step_count = 0;
        self.done = false;
    }

    pub(crate) fn add_reward(&mut self, reward: f32) {
        self.cumulative_reward += reward;
        self.tick_reward += reward;
    }

    /// Move forward by `throttle * move_speed * dt`, then rotate by
    /// `turn.sign() * turn_speed * dt` degrees, then pay the step cost.
    pub(crate) fn act(
        &mut self,
        action: Action,
        dt: f32,
        move_speed: f32,
        turn_speed: f32,
        step_cost: f32,
    ) {
        self.position += self.forward() * action.throttle * move_speed * dt;
        self.yaw = normalize_yaw(self.yaw + action.turn.sign() * turn_speed * dt);
        self.step_count += 1;
        self.add_reward(step_cost);
    }

    /// `Seeking → Carrying`. Returns `false` (and changes nothing) when
    /// already carrying.
    pub(crate) fn try_eat(&mut self) -> bool {
        if self.is_carrying() {
            return false;
        }
        self.state = PenguinState::Carrying;
        self.add_reward(EAT_REWARD);
        true
    }

    /// `Carrying → Seeking`. Returns `false` (and changes nothing) when
    /// not carrying.
    pub(crate) fn try_regurgitate(&mut self) -> bool {
        if !self.is_carrying() {
            return false;
        }
        self.state = PenguinState::Seeking;
        self.add_reward(FEED_REWARD);
        true
    }

    pub(crate) fn mark_done(&mut self) {
        self.done = true;
    }

    /// Reward accrued since the last call, step cost included.
    pub(crate) fn take_tick_reward(&mut self) -> f32 {
        std::mem::take(&mut self.tick_reward)
    }
}
