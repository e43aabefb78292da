//! Environment configuration, validation, and error types.
//!
//! [`EnvConfig`] is the builder-input for constructing a
//! [`PenguinEnv`](crate::env::PenguinEnv). Defaults reproduce the
//! reference penguin scene; [`validate()`](EnvConfig::validate) checks
//! structural invariants once at startup so the tick path never has to.

use glam::Vec3;
use rookery_core::Wedge;
use thiserror::Error;

// ── FeedTrigger ────────────────────────────────────────────────────

/// Which paths may deliver food to the baby.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedTrigger {
    /// Both the per-tick `feed_radius` distance check and the penguin
    /// starting to touch the baby.
    #[default]
    ProximityAndContact,
    /// Only the per-tick distance check. Contact with the baby is ignored.
    ProximityOnly,
}

// ── AreaConfig ─────────────────────────────────────────────────────

/// Layout of one training area.
///
/// Wedges are relative to `center` and are lifted by `spawn_height`.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaConfig {
    /// Center of the area. Default: origin.
    pub center: Vec3,
    /// Penguin spawn region. Default: full circle, radius 0–9.
    pub penguin_wedge: Wedge,
    /// Baby spawn region. Default: ±45°, radius 4–9.
    pub baby_wedge: Wedge,
    /// Fish spawn region. Default: 100°–260°, radius 2–13.
    pub fish_wedge: Wedge,
    /// Region fish pick swim targets from. Default: 100°–360°, radius 2–13.
    pub fish_swim_wedge: Wedge,
    /// Fish spawned per episode. Default: 4.
    pub fish_count: usize,
    /// Height above `center` for every spawned entity. Default: 0.5.
    pub spawn_height: f32,
    /// Fixed baby heading in degrees. Default: 180.
    pub baby_yaw: f32,
    /// Penguin contact sphere radius. Default: 0.5.
    pub penguin_radius: f32,
    /// Fish contact sphere radius. Default: 0.3.
    pub fish_radius: f32,
    /// Baby contact sphere radius. Default: 0.5.
    pub baby_radius: f32,
    /// Lifetime of feed effects in simulated seconds. Default: 4.
    pub effect_lifetime: f32,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            penguin_wedge: Wedge::new(0.0, 360.0, 0.0, 9.0),
            baby_wedge: Wedge::new(-45.0, 45.0, 4.0, 9.0),
            fish_wedge: Wedge::new(100.0, 260.0, 2.0, 13.0),
            fish_swim_wedge: Wedge::new(100.0, 360.0, 2.0, 13.0),
            fish_count: 4,
            spawn_height: 0.5,
            baby_yaw: 180.0,
            penguin_radius: 0.5,
            fish_radius: 0.3,
            baby_radius: 0.5,
            effect_lifetime: 4.0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EnvConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `dt` is NaN, infinite, zero, or negative.
    #[error("dt must be finite and positive, got {value}")]
    InvalidTimestep {
        /// The invalid value.
        value: f32,
    },
    /// `max_steps` is zero, which would make the step cost unbounded.
    #[error("max_steps must be at least 1")]
    ZeroMaxSteps,
    /// No fish would ever spawn, so no episode could finish.
    #[error("fish_count must be at least 1")]
    NoFish,
    /// A speed, radius, or lifetime is NaN, infinite, or negative, or a
    /// signed setting (height, heading) is not finite.
    #[error("invalid {name}: {value}")]
    InvalidScalar {
        /// Name of the offending setting.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// A wedge failed validation.
    #[error("invalid {name}: {reason}")]
    InvalidWedge {
        /// Name of the offending wedge.
        name: &'static str,
        /// Description of the validation failure.
        reason: String,
    },
    /// The area center is not finite.
    #[error("area center must be finite, got {value:?}")]
    InvalidCenter {
        /// The invalid value.
        value: Vec3,
    },
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Complete configuration for one penguin environment.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Area layout.
    pub area: AreaConfig,
    /// Simulation timestep in seconds. Default: 0.02.
    pub dt: f32,
    /// RNG seed for deterministic placement and swimming. Default: 0.
    pub seed: u64,
    /// Step limit per episode. Each tick costs `1 / max_steps`. Default: 5000.
    pub max_steps: u32,
    /// Forward speed at full throttle, units per second. Default: 5.
    pub move_speed: f32,
    /// Turning speed, degrees per second. Default: 180.
    pub turn_speed: f32,
    /// Which paths may feed the baby.
    pub feed_trigger: FeedTrigger,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            area: AreaConfig::default(),
            dt: 0.02,
            seed: 0,
            max_steps: 5000,
            move_speed: 5.0,
            turn_speed: 180.0,
            feed_trigger: FeedTrigger::default(),
        }
    }
}

impl EnvConfig {
    /// Default configuration with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reward added every tick: `-1 / max_steps`.
    ///
    /// A full-length episode therefore pays exactly `-1` in step costs,
    /// whatever `max_steps` is.
    pub fn step_cost(&self) -> f32 {
        -1.0 / self.max_steps as f32
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Timestep.
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep { value: self.dt });
        }
        // 2. Step limit.
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        // 3. Non-negative scalars.
        let a = &self.area;
        let scalars = [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("penguin_radius", a.penguin_radius),
            ("fish_radius", a.fish_radius),
            ("baby_radius", a.baby_radius),
            ("effect_lifetime", a.effect_lifetime),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidScalar { name, value });
            }
        }
        for (name, value) in [("spawn_height", a.spawn_height), ("baby_yaw", a.baby_yaw)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidScalar { name, value });
            }
        }
        // 4. Center.
        if !a.center.is_finite() {
            return Err(ConfigError::InvalidCenter { value: a.center });
        }
        // 5. Wedges.
        let wedges = [
            ("penguin_wedge", &a.penguin_wedge),
            ("baby_wedge", &a.baby_wedge),
            ("fish_wedge", &a.fish_wedge),
            ("fish_swim_wedge", &a.fish_swim_wedge),
        ];
        for (name, wedge) in wedges {
            wedge
                .validate()
                .map_err(|reason| ConfigError::InvalidWedge { name, reason })?;
        }
        // 6. At least one fish.
        if a.fish_count == 0 {
            return Err(ConfigError::NoFish);
        }
        Ok(())
    }
}
