//! Short-lived cosmetic effects spawned when the baby is fed.
//!
//! Effects are fire-and-forget: they carry no simulation state, nothing
//! reads them back, and each one expires on its own once the area clock
//! passes its deadline. They exist for renderers and debugging tools.

use glam::Vec3;

/// What an effect depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// The regurgitated fish, placed at the baby.
    RegurgitatedFish,
    /// A heart floating one unit above the baby.
    Heart,
}

/// One live effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    /// What the effect depicts.
    pub kind: EffectKind,
    /// Where it was spawned.
    pub position: Vec3,
    /// Area clock time at which it disappears.
    pub expires_at: f32,
}

/// Live effects of one area.
#[derive(Clone, Debug, Default)]
pub struct Effects {
    live: Vec<Effect>,
}

impl Effects {
    pub(crate) fn spawn(&mut self, kind: EffectKind, position: Vec3, now: f32, lifetime: f32) {
        self.live.push(Effect {
            kind,
            position,
            expires_at: now + lifetime,
        });
    }

    /// Drop every effect whose deadline has passed.
    pub(crate) fn expire(&mut self, now: f32) {
        self.live.retain(|e| e.expires_at > now);
    }

    /// Currently live effects, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.live.iter()
    }

    /// Number of live effects.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no effect is live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_expire_after_lifetime() {
        let mut fx = Effects::default();
        fx.spawn(EffectKind::Heart, Vec3::Y, 1.0, 4.0);
        fx.spawn(EffectKind::RegurgitatedFish, Vec3::ZERO, 2.0, 4.0);
        fx.expire(4.9);
        assert_eq!(fx.len(), 2);
        fx.expire(5.0);
        assert_eq!(fx.len(), 1);
        assert_eq!(fx.iter().next().unwrap().kind, EffectKind::RegurgitatedFish);
        fx.expire(6.0);
        assert!(fx.is_empty());
    }
}
