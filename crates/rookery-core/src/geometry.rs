//! Yaw conventions and wedge-shaped spawn regions.
//!
//! The world is Y-up. Yaw is measured in degrees around +Y, with yaw 0
//! facing [`FORWARD`] (+Z) and yaw 90 facing +X. Every placement in an
//! area is expressed as a [`Wedge`]: an angular range and a radial range
//! around the area center, sampled by [`choose_random_position`].

use glam::{Quat, Vec3};
use rand::Rng;

/// World forward axis (yaw 0).
pub const FORWARD: Vec3 = Vec3::Z;

/// World up axis.
pub const UP: Vec3 = Vec3::Y;

/// Rotation of `degrees` around the vertical axis.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Unit facing vector for a yaw in degrees.
pub fn forward_from_yaw(degrees: f32) -> Vec3 {
    yaw_rotation(degrees) * FORWARD
}

/// Wrap a yaw into `[0, 360)`.
pub fn normalize_yaw(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Horizontal bearing of `offset` in degrees, in `[0, 360)`.
///
/// Inverse of [`forward_from_yaw`] on the XZ plane. Returns 0 for a
/// zero-length horizontal offset.
pub fn bearing(offset: Vec3) -> f32 {
    if offset.x == 0.0 && offset.z == 0.0 {
        return 0.0;
    }
    normalize_yaw(offset.x.atan2(offset.z).to_degrees())
}

/// Annular sector around a center point, in degrees and world units.
///
/// A range whose maximum is not strictly greater than its minimum is
/// degenerate: sampling always returns the minimum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    /// Start of the angular range.
    pub min_angle: f32,
    /// End of the angular range.
    pub max_angle: f32,
    /// Inner radius.
    pub min_radius: f32,
    /// Outer radius.
    pub max_radius: f32,
}

impl Wedge {
    /// Create a wedge.
    pub const fn new(min_angle: f32, max_angle: f32, min_radius: f32, max_radius: f32) -> Self {
        Self {
            min_angle,
            max_angle,
            min_radius,
            max_radius,
        }
    }

    /// Single point at `angle` and `radius`.
    pub const fn point(angle: f32, radius: f32) -> Self {
        Self::new(angle, angle, radius, radius)
    }

    /// Check structural validity: finite bounds, non-negative radii,
    /// ranges not inverted.
    pub fn validate(&self) -> Result<(), String> {
        let bounds = [
            self.min_angle,
            self.max_angle,
            self.min_radius,
            self.max_radius,
        ];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(format!("wedge bounds must be finite, got {self:?}"));
        }
        if self.min_radius < 0.0 {
            return Err(format!(
                "min_radius must be >= 0, got {}",
                self.min_radius
            ));
        }
        if self.max_radius < self.min_radius {
            return Err(format!(
                "max_radius ({}) is below min_radius ({})",
                self.max_radius, self.min_radius
            ));
        }
        if self.max_angle < self.min_angle {
            return Err(format!(
                "max_angle ({}) is below min_angle ({})",
                self.max_angle, self.min_angle
            ));
        }
        Ok(())
    }

    /// Whether `point` lies inside the wedge around `center`, measured on
    /// the horizontal plane, allowing `tolerance` of slack on both the
    /// radius (world units) and the angle (degrees).
    pub fn contains(&self, center: Vec3, point: Vec3, tolerance: f32) -> bool {
        let offset = point - center;
        let radius = (offset.x * offset.x + offset.z * offset.z).sqrt();
        if radius < self.min_radius - tolerance || radius > self.max_radius + tolerance {
            return false;
        }
        let span = self.max_angle - self.min_angle;
        if span >= 360.0 || radius <= tolerance {
            return true;
        }
        let from_min = (bearing(offset) - self.min_angle).rem_euclid(360.0);
        from_min <= span + tolerance || from_min >= 360.0 - tolerance
    }
}

/// Pick a point inside `wedge` around `center`.
///
/// Radius and angle are drawn uniformly from their ranges; a degenerate
/// range contributes its minimum without consuming randomness. The result
/// is `center + rotate_y(FORWARD, angle) * radius`.
pub fn choose_random_position<R: Rng + ?Sized>(rng: &mut R, center: Vec3, wedge: &Wedge) -> Vec3 {
    let radius = if wedge.max_radius > wedge.min_radius {
        rng.random_range(wedge.min_radius..wedge.max_radius)
    } else {
        wedge.min_radius
    };
    let angle = if wedge.max_angle > wedge.min_angle {
        rng.random_range(wedge.min_angle..wedge.max_angle)
    } else {
        wedge.min_angle
    };
    center + forward_from_yaw(angle) * radius
}
