//! Reusable policies for driving a [`PenguinEnv`] in tests and benches.
//!
//! - [`ScriptedPolicy`] replays a fixed action list, cycling.
//! - [`GreedyPolicy`] walks to the nearest fish, then back to the baby.
//! - [`steer_toward`] is the single-target steering rule both build on.

use glam::Vec3;
use rookery_core::geometry::bearing;
use rookery_core::{Action, Turn};
use rookery_engine::{Penguin, PenguinEnv};

/// Heading error (degrees) below which the penguin stops turning.
/// Larger than one tick of turning at the default speed, so the
/// heading settles instead of flipping between left and right.
const DEAD_BAND: f32 = 4.0;

/// Heading error (degrees) above which the penguin turns in place.
const ALIGN_BEFORE_MOVING: f32 = 30.0;

/// Action that turns the penguin toward `target` and walks once roughly
/// aligned.
pub fn steer_toward(penguin: &Penguin, target: Vec3) -> Action {
    let offset = target - penguin.position();
    // Signed heading error in [-180, 180); positive means turn right.
    let error = (bearing(offset) - penguin.yaw() + 540.0).rem_euclid(360.0) - 180.0;
    let turn = if error > DEAD_BAND {
        Turn::Right
    } else if error < -DEAD_BAND {
        Turn::Left
    } else {
        Turn::Straight
    };
    let throttle = if error.abs() <= ALIGN_BEFORE_MOVING {
        1.0
    } else {
        0.0
    };
    Action::new(throttle, turn)
}

/// Fetches the nearest live fish, then carries it to the baby.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn act(&self, env: &PenguinEnv) -> Action {
        let penguin = env.penguin();
        let baby = env.area().baby().position();
        if penguin.is_carrying() {
            return steer_toward(penguin, baby);
        }
        let here = penguin.position();
        let nearest = env.area().fish().map(|f| f.position()).min_by(|a, b| {
            a.distance_squared(here)
                .total_cmp(&b.distance_squared(here))
        });
        steer_toward(penguin, nearest.unwrap_or(baby))
    }
}

/// Replays a fixed list of actions, starting over at the end.
#[derive(Clone, Debug)]
pub struct ScriptedPolicy {
    actions: Vec<Action>,
    cursor: usize,
}

impl ScriptedPolicy {
    /// An empty list behaves like [`ScriptedPolicy::repeat`] of
    /// [`Action::IDLE`].
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, cursor: 0 }
    }

    pub fn repeat(action: Action) -> Self {
        Self::new(vec![action])
    }

    /// Next action in the script.
    pub fn next_action(&mut self) -> Action {
        if self.actions.is_empty() {
            return Action::IDLE;
        }
        let action = self.actions[self.cursor];
        self.cursor = (self.cursor + 1) % self.actions.len();
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_env, quiet_config};
    use rookery_curriculum::CurriculumParameters;

    #[test]
    fn scripted_policy_cycles() {
        let a = Action::new(1.0, Turn::Left);
        let b = Action::new(0.5, Turn::Right);
        let mut policy = ScriptedPolicy::new(vec![a, b]);
        assert_eq!(policy.next_action(), a);
        assert_eq!(policy.next_action(), b);
        assert_eq!(policy.next_action(), a);
    }

    #[test]
    fn empty_script_idles() {
        let mut policy = ScriptedPolicy::new(Vec::new());
        assert_eq!(policy.next_action(), Action::IDLE);
    }

    #[test]
    fn steering_turns_toward_target() {
        let env = make_env(quiet_config(2), CurriculumParameters::new());
        let penguin = env.penguin();
        let ahead = penguin.position() + penguin.forward() * 5.0;
        assert_eq!(steer_toward(penguin, ahead), Action::new(1.0, Turn::Straight));
        let behind = penguin.position() - penguin.forward() * 5.0;
        assert_eq!(steer_toward(penguin, behind).throttle, 0.0);
    }
}
