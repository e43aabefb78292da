//! Action encoding shared by policies, the heuristic controller and the
//! engine.
//!
//! A policy emits two floats per tick: a forward throttle and a discrete
//! turn code. [`Action`] is the decoded form; [`Action::from_slice`] and
//! [`Action::to_array`] convert to and from the raw vector.

use crate::error::ActionError;

/// Number of floats in a raw action vector.
pub const ACTION_LEN: usize = 2;

/// Discrete turn command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Turn {
    /// Keep the current heading.
    #[default]
    Straight = 0,
    /// Rotate counter-clockwise when viewed from above (yaw decreases).
    Left = 1,
    /// Rotate clockwise when viewed from above (yaw increases).
    Right = 2,
}

impl Turn {
    /// Decode a turn code. Exactly `1.0` is left and exactly `2.0` is
    /// right; every other value, including out-of-range codes, means
    /// straight.
    pub fn from_code(code: f32) -> Self {
        if code == 1.0 {
            Turn::Left
        } else if code == 2.0 {
            Turn::Right
        } else {
            Turn::Straight
        }
    }

    /// The raw code for this turn.
    pub fn code(self) -> f32 {
        self as u8 as f32
    }

    /// Multiplier applied to the turn speed: `-1` left, `+1` right.
    pub fn sign(self) -> f32 {
        match self {
            Turn::Straight => 0.0,
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

/// One decoded per-tick action.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Action {
    /// Forward throttle. The policy normally emits 0 or 1, but any finite
    /// value is applied as-is (negative values move backwards).
    pub throttle: f32,
    /// Turn command.
    pub turn: Turn,
}

impl Action {
    /// Stand still and keep the heading.
    pub const IDLE: Action = Action {
        throttle: 0.0,
        turn: Turn::Straight,
    };

    /// Create an action from its parts.
    pub fn new(throttle: f32, turn: Turn) -> Self {
        Self { throttle, turn }
    }

    /// Decode a raw action vector `[throttle, turn_code]`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::WrongLength`] unless the slice has exactly
    /// [`ACTION_LEN`] entries, and [`ActionError::NonFinite`] if either
    /// entry is NaN or infinite.
    pub fn from_slice(raw: &[f32]) -> Result<Self, ActionError> {
        if raw.len() != ACTION_LEN {
            return Err(ActionError::WrongLength {
                expected: ACTION_LEN,
                got: raw.len(),
            });
        }
        if let Some((index, &value)) = raw.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ActionError::NonFinite { index, value });
        }
        Ok(Self {
            throttle: raw[0],
            turn: Turn::from_code(raw[1]),
        })
    }

    /// Encode back into the raw vector form.
    pub fn to_array(self) -> [f32; ACTION_LEN] {
        [self.throttle, self.turn.code()]
    }

    /// Map directional key state to an action, bypassing the policy.
    ///
    /// Forward gives full throttle. Left wins over right when both are
    /// held.
    pub fn heuristic(input: HeuristicInput) -> Self {
        let throttle = if input.forward { 1.0 } else { 0.0 };
        let turn = if input.left {
            Turn::Left
        } else if input.right {
            Turn::Right
        } else {
            Turn::Straight
        };
        Self { throttle, turn }
    }
}

impl TryFrom<&[f32]> for Action {
    type Error = ActionError;

    fn try_from(raw: &[f32]) -> Result<Self, Self::Error> {
        Self::from_slice(raw)
    }
}

impl From<Action> for [f32; ACTION_LEN] {
    fn from(action: Action) -> Self {
        action.to_array()
    }
}

/// Directional key state for manual control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeuristicInput {
    /// Move forward (`W`).
    pub forward: bool,
    /// Turn left (`A`).
    pub left: bool,
    /// Turn right (`D`).
    pub right: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_turn_codes() {
        assert_eq!(Turn::from_code(0.0), Turn::Straight);
        assert_eq!(Turn::from_code(1.0), Turn::Left);
        assert_eq!(Turn::from_code(2.0), Turn::Right);
        assert_eq!(Turn::from_code(3.0), Turn::Straight);
        assert_eq!(Turn::from_code(1.5), Turn::Straight);
        assert_eq!(Turn::from_code(-1.0), Turn::Straight);
    }

    #[test]
    fn from_slice_reads_throttle_and_turn() {
        let action = Action::from_slice(&[1.0, 2.0]).unwrap();
        assert_eq!(action, Action::new(1.0, Turn::Right));
        assert_eq!(action.to_array(), [1.0, 2.0]);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert_eq!(
            Action::from_slice(&[1.0]),
            Err(ActionError::WrongLength {
                expected: 2,
                got: 1
            })
        );
        assert!(Action::from_slice(&[1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn from_slice_rejects_nan() {
        let err = Action::from_slice(&[0.0, f32::NAN]).unwrap_err();
        assert!(matches!(err, ActionError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn heuristic_mapping() {
        let idle = Action::heuristic(HeuristicInput::default());
        assert_eq!(idle, Action::IDLE);

        let forward_left = Action::heuristic(HeuristicInput {
            forward: true,
            left: true,
            right: true,
        });
        assert_eq!(forward_left.to_array(), [1.0, 1.0]);

        let right = Action::heuristic(HeuristicInput {
            right: true,
            ..Default::default()
        });
        assert_eq!(right.to_array(), [0.0, 2.0]);
    }

    #[test]
    fn turn_sign_matches_direction() {
        assert_eq!(Turn::Left.sign(), -1.0);
        assert_eq!(Turn::Right.sign(), 1.0);
        assert_eq!(Turn::Straight.sign(), 0.0);
    }
}
