//! Fixed-layout observation vector.

use glam::Vec3;

/// Number of floats in an [`Observation`].
pub const OBSERVATION_LEN: usize = 8;

/// Per-tick observation handed to the policy.
///
/// Layout, in order:
///
/// | Index | Meaning |
/// |-------|---------|
/// | 0 | 1.0 if the penguin is carrying a fish, else 0.0 |
/// | 1 | distance from penguin to baby |
/// | 2..5 | unit direction from penguin to baby (zero if coincident) |
/// | 5..8 | penguin facing direction |
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation([f32; OBSERVATION_LEN]);

impl Observation {
    /// Assemble an observation from penguin and baby state.
    pub fn new(carrying: bool, penguin: Vec3, facing: Vec3, baby: Vec3) -> Self {
        let offset = baby - penguin;
        let direction = offset.normalize_or_zero();
        Self([
            if carrying { 1.0 } else { 0.0 },
            offset.length(),
            direction.x,
            direction.y,
            direction.z,
            facing.x,
            facing.y,
            facing.z,
        ])
    }

    /// Whether the penguin is carrying food.
    pub fn carrying(&self) -> bool {
        self.0[0] != 0.0
    }

    /// Distance from penguin to baby.
    pub fn distance_to_baby(&self) -> f32 {
        self.0[1]
    }

    /// Unit direction from penguin to baby.
    pub fn direction_to_baby(&self) -> Vec3 {
        Vec3::new(self.0[2], self.0[3], self.0[4])
    }

    /// Penguin facing direction.
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.0[5], self.0[6], self.0[7])
    }

    /// The raw vector.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Consume into the raw array.
    pub fn into_array(self) -> [f32; OBSERVATION_LEN] {
        self.0
    }
}

impl AsRef<[f32]> for Observation {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Observation> for [f32; OBSERVATION_LEN] {
    fn from(obs: Observation) -> Self {
        obs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_accessors() {
        let obs = Observation::new(
            true,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::X,
            Vec3::new(0.0, 0.5, 4.0),
        );
        assert_eq!(obs.as_slice().len(), OBSERVATION_LEN);
        assert!(obs.carrying());
        assert_eq!(obs.distance_to_baby(), 4.0);
        assert_eq!(obs.direction_to_baby(), Vec3::Z);
        assert_eq!(obs.facing(), Vec3::X);
        assert_eq!(obs.into_array()[0], 1.0);
    }

    #[test]
    fn coincident_positions_give_zero_direction() {
        let p = Vec3::new(1.0, 0.5, 1.0);
        let obs = Observation::new(false, p, Vec3::Z, p);
        assert_eq!(obs.distance_to_baby(), 0.0);
        assert_eq!(obs.direction_to_baby(), Vec3::ZERO);
        assert!(!obs.carrying());
    }
}
