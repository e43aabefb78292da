//! Live fish and their swimming behavior.
//!
//! A fish with positive speed repeatedly picks a target inside the swim
//! wedge, turns to face it, and swims there at a randomized cruising
//! speed. Fish with zero speed (the start of a curriculum) never move.

use glam::Vec3;
use rand::Rng;
use rookery_core::geometry::{bearing, normalize_yaw};
use rookery_core::{choose_random_position, forward_from_yaw, FishId, Wedge, UP};

/// Where a fish is swimming to and how fast.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Course {
    target: Vec3,
    cruise_speed: f32,
    /// Area clock time at which a new target is picked.
    retarget_at: f32,
}

/// One fish in an area.
#[derive(Clone, Debug, PartialEq)]
pub struct Fish {
    id: FishId,
    position: Vec3,
    yaw: f32,
    speed: f32,
    course: Course,
}

impl Fish {
    pub(crate) fn new(id: FishId, position: Vec3, yaw: f32, speed: f32) -> Self {
        Self {
            id,
            position,
            yaw: normalize_yaw(yaw),
            speed: speed.max(0.0),
            course: Course {
                target: position,
                cruise_speed: 0.0,
                retarget_at: 0.0,
            },
        }
    }

    /// Identifier within the owning area.
    pub fn id(&self) -> FishId {
        self.id
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Base swimming speed assigned at spawn.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one tick of swimming.
    ///
    /// `now` is the area clock after this tick's advance. Targets are
    /// drawn from `wedge` around `center`, lifted by `height`.
    pub(crate) fn swim<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dt: f32,
        now: f32,
        center: Vec3,
        wedge: &Wedge,
        height: f32,
    ) {
        if self.speed <= 0.0 {
            return;
        }

        if now >= self.course.retarget_at {
            let cruise_speed = self.speed * rng.random_range(0.5..1.5);
            let target = choose_random_position(rng, center, wedge) + UP * height;
            let heading = target - self.position;
            if heading.x != 0.0 || heading.z != 0.0 {
                self.yaw = bearing(heading);
            }
            self.course = Course {
                target,
                cruise_speed,
                retarget_at: now + heading.length() / cruise_speed,
            };
            return;
        }

        let step = forward_from_yaw(self.yaw) * self.course.cruise_speed * dt;
        let remaining = self.position.distance(self.course.target);
        if step.length() <= remaining {
            self.position += step;
        } else {
            self.position = self.course.target;
            self.course.retarget_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn still_fish_never_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let start = Vec3::new(0.0, 0.5, -3.0);
        let mut fish = Fish::new(FishId(0), start, 45.0, 0.0);
        let wedge = Wedge::new(100.0, 360.0, 2.0, 13.0);
        for tick in 1..100 {
            fish.swim(&mut rng, 0.02, tick as f32 * 0.02, Vec3::ZERO, &wedge, 0.5);
        }
        assert_eq!(fish.position(), start);
        assert_eq!(fish.yaw(), 45.0);
    }

    #[test]
    fn negative_speed_is_clamped() {
        let fish = Fish::new(FishId(0), Vec3::ZERO, 0.0, -2.0);
        assert_eq!(fish.speed(), 0.0);
    }

    #[test]
    fn swimming_fish_reach_their_target_without_overshoot() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut fish = Fish::new(FishId(3), Vec3::new(0.0, 0.5, -5.0), 0.0, 2.0);
        // Single-point wedge so the target is known.
        let wedge = Wedge::point(90.0, 5.0);
        let target = forward_from_yaw(90.0) * 5.0 + UP * 0.5;
        let dt = 0.02;
        let mut now = dt;
        fish.swim(&mut rng, dt, now, Vec3::ZERO, &wedge, 0.5);
        let start_distance = fish.position().distance(target);

        let mut last = start_distance;
        for _ in 0..2000 {
            now += dt;
            fish.swim(&mut rng, dt, now, Vec3::ZERO, &wedge, 0.5);
            let d = fish.position().distance(target);
            assert!(d <= last + 1e-4, "fish moved away from its target");
            last = d;
            if d == 0.0 {
                break;
            }
        }
        assert_eq!(fish.position(), target);
        assert!(fish.position().distance(Vec3::new(0.0, 0.5, -5.0)) > 0.0);
    }

    #[test]
    fn retarget_faces_the_new_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut fish = Fish::new(FishId(1), Vec3::new(0.0, 0.5, 0.0), 0.0, 1.0);
        let wedge = Wedge::point(180.0, 6.0);
        fish.swim(&mut rng, 0.02, 0.02, Vec3::ZERO, &wedge, 0.5);
        assert!((fish.yaw() - 180.0).abs() < 1e-3);
        // Retargeting consumes the tick; the fish has not moved yet.
        assert_eq!(fish.position(), Vec3::new(0.0, 0.5, 0.0));
    }
}
