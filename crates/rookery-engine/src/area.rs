//! The episode controller: one training area and everything in it.
//!
//! [`Area`] owns the penguin, the baby and the live fish by value. It
//! places them at episode start, removes fish as they are eaten, runs the
//! fish swimming and contact detection each tick, and applies the
//! eat/feed rules that move the penguin through its state machine.
//!
//! Everything goes through `&mut self`, so no caller can observe a
//! partially reset or partially ticked area.

use glam::Vec3;
use indexmap::{IndexMap, IndexSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rookery_core::geometry::normalize_yaw;
use rookery_core::{
    choose_random_position, EpisodeEvent, FeedSource, FishId, Observation, Wedge, UP,
};
use rookery_curriculum::ParameterSnapshot;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::AreaConfig;
use crate::effects::{EffectKind, Effects};
use crate::fish::Fish;
use crate::penguin::Penguin;

/// The baby penguin. Repositioned at every reset, otherwise passive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baby {
    position: Vec3,
    yaw: f32,
}

impl Baby {
    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

/// Something the penguin can touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contact {
    /// A live fish.
    Fish(FishId),
    /// The baby.
    Baby,
}

/// Contacts that began during one tick.
pub type Contacts = SmallVec<[Contact; 4]>;

/// One training area.
#[derive(Clone, Debug)]
pub struct Area {
    config: AreaConfig,
    rng: ChaCha8Rng,
    clock: f32,
    penguin: Penguin,
    baby: Baby,
    fish: IndexMap<FishId, Fish>,
    next_fish_id: u64,
    touching: IndexSet<Contact>,
    effects: Effects,
}

impl Area {
    /// Create an empty area. Call [`reset`](Self::reset) before use.
    pub fn new(config: AreaConfig, seed: u64) -> Self {
        let baby = Baby {
            position: config.center,
            yaw: normalize_yaw(config.baby_yaw),
        };
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: 0.0,
            penguin: Penguin::new(),
            baby,
            fish: IndexMap::new(),
            next_fish_id: 0,
            touching: IndexSet::new(),
            effects: Effects::default(),
        }
    }

    /// Restart the placement and swimming random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Start a new episode.
    ///
    /// Removes every live fish, clears the penguin's episode state,
    /// places the penguin and the baby inside their wedges, and spawns
    /// `fish_count` fish whose speed is the snapshot's `fish_speed`.
    pub fn reset(&mut self, params: &ParameterSnapshot) {
        self.fish.clear();
        self.touching.clear();
        self.penguin.begin_episode();
        self.place_penguin();
        self.place_baby();
        self.spawn_fish(self.config.fish_count, params.fish_speed());
        debug!(
            fish = self.fish.len(),
            fish_speed = params.fish_speed(),
            penguin = ?self.penguin.position(),
            baby = ?self.baby.position,
            "area reset"
        );
    }

    fn spawn_point(&mut self, wedge: Wedge) -> Vec3 {
        choose_random_position(&mut self.rng, self.config.center, &wedge)
            + UP * self.config.spawn_height
    }

    fn place_penguin(&mut self) {
        let position = self.spawn_point(self.config.penguin_wedge);
        let yaw = self.rng.random_range(0.0..360.0);
        self.penguin.place(position, yaw);
    }

    fn place_baby(&mut self) {
        self.baby = Baby {
            position: self.spawn_point(self.config.baby_wedge),
            yaw: normalize_yaw(self.config.baby_yaw),
        };
    }

    fn spawn_fish(&mut self, count: usize, speed: f32) {
        for _ in 0..count {
            let position = self.spawn_point(self.config.fish_wedge);
            let yaw = self.rng.random_range(0.0..360.0);
            let id = FishId(self.next_fish_id);
            self.next_fish_id += 1;
            self.fish.insert(id, Fish::new(id, position, yaw, speed));
        }
    }

    /// Remove one fish. Returns `false` and changes nothing if the fish
    /// is not live.
    pub fn remove_fish(&mut self, id: FishId) -> bool {
        self.fish.shift_remove(&id).is_some()
    }

    /// Number of live fish.
    pub fn remaining_fish(&self) -> usize {
        self.fish.len()
    }

    /// Live fish in spawn order.
    pub fn fish(&self) -> impl Iterator<Item = &Fish> {
        self.fish.values()
    }

    /// Look up a live fish.
    pub fn get_fish(&self, id: FishId) -> Option<&Fish> {
        self.fish.get(&id)
    }

    /// The penguin.
    pub fn penguin(&self) -> &Penguin {
        &self.penguin
    }

    pub(crate) fn penguin_mut(&mut self) -> &mut Penguin {
        &mut self.penguin
    }

    /// The baby.
    pub fn baby(&self) -> &Baby {
        &self.baby
    }

    /// Live cosmetic effects.
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Area layout.
    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    /// Simulated seconds since the area was created. Never reset, so
    /// effect and swim timers survive episode boundaries.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Distance from penguin to baby.
    pub fn distance_to_baby(&self) -> f32 {
        self.penguin.position().distance(self.baby.position)
    }

    /// Observation of the current state.
    pub fn observe(&self) -> Observation {
        self.penguin.observe(self.baby.position)
    }

    /// Penguin touched fish `id`.
    ///
    /// When the penguin is empty-handed and the fish is live, the fish is
    /// eaten: the penguin starts carrying, earns the eat reward, and the
    /// fish is removed. Otherwise nothing happens.
    pub fn on_fish_collision(&mut self, id: FishId) -> Option<EpisodeEvent> {
        if !self.fish.contains_key(&id) || !self.penguin.try_eat() {
            return None;
        }
        self.remove_fish(id);
        Some(EpisodeEvent::FishEaten { fish: id })
    }

    /// Deliver the carried fish to the baby.
    ///
    /// No-op when the penguin is not carrying. Otherwise the penguin earns
    /// the feed reward, effects are spawned at the baby, and if no fish
    /// remain the episode is marked done.
    pub fn feed_baby(&mut self, source: FeedSource) -> Option<EpisodeEvent> {
        if !self.penguin.try_regurgitate() {
            return None;
        }
        let lifetime = self.config.effect_lifetime;
        let at = self.baby.position;
        self.effects
            .spawn(EffectKind::RegurgitatedFish, at, self.clock, lifetime);
        self.effects
            .spawn(EffectKind::Heart, at + UP, self.clock, lifetime);

        let remaining_fish = self.fish.len();
        if remaining_fish == 0 {
            self.penguin.mark_done();
        }
        Some(EpisodeEvent::BabyFed {
            source,
            remaining_fish,
        })
    }

    /// Advance the clock by `dt`, move the fish, and expire effects.
    pub(crate) fn advance(&mut self, dt: f32) {
        self.clock += dt;
        let now = self.clock;
        let center = self.config.center;
        let wedge = self.config.fish_swim_wedge;
        let height = self.config.spawn_height;
        for fish in self.fish.values_mut() {
            fish.swim(&mut self.rng, dt, now, center, &wedge, height);
        }
        self.effects.expire(now);
    }

    /// Recompute which entities the penguin overlaps and return the
    /// contacts that began since the previous call, fish first in spawn
    /// order, then the baby.
    pub(crate) fn detect_contacts(&mut self) -> Contacts {
        let origin = self.penguin.position();
        let fish_reach = self.config.penguin_radius + self.config.fish_radius;
        let baby_reach = self.config.penguin_radius + self.config.baby_radius;

        let mut current: IndexSet<Contact> = self
            .fish
            .values()
            .filter(|f| f.position().distance(origin) <= fish_reach)
            .map(|f| Contact::Fish(f.id()))
            .collect();
        if self.baby.position.distance(origin) <= baby_reach {
            current.insert(Contact::Baby);
        }

        let entered = current
            .iter()
            .filter(|c| !self.touching.contains(*c))
            .copied()
            .collect();
        self.touching = current;
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookery_curriculum::{CurriculumParameters, FISH_SPEED};

    fn reset_area(seed: u64) -> Area {
        let mut area = Area::new(AreaConfig::default(), seed);
        area.reset(&CurriculumParameters::new().snapshot());
        area
    }

    #[test]
    fn reset_spawns_configured_fish() {
        let area = reset_area(1);
        assert_eq!(area.remaining_fish(), 4);
        let ids: Vec<FishId> = area.fish().map(|f| f.id()).collect();
        assert_eq!(ids, vec![FishId(0), FishId(1), FishId(2), FishId(3)]);
    }

    #[test]
    fn reset_replaces_fish_with_fresh_ids() {
        let mut area = reset_area(1);
        area.remove_fish(FishId(2));
        area.reset(&CurriculumParameters::new().snapshot());
        assert_eq!(area.remaining_fish(), 4);
        assert!(area.get_fish(FishId(0)).is_none());
        assert!(area.get_fish(FishId(4)).is_some());
    }

    #[test]
    fn fish_speed_comes_from_snapshot() {
        let params = CurriculumParameters::new();
        params.set(FISH_SPEED, 1.5);
        let mut area = Area::new(AreaConfig::default(), 5);
        area.reset(&params.snapshot());
        assert!(area.fish().all(|f| f.speed() == 1.5));
    }

    #[test]
    fn removing_absent_fish_is_noop() {
        let mut area = reset_area(2);
        assert!(area.remove_fish(FishId(1)));
        assert!(!area.remove_fish(FishId(1)));
        assert!(!area.remove_fish(FishId(99)));
        assert_eq!(area.remaining_fish(), 3);
    }

    #[test]
    fn baby_faces_fixed_heading() {
        let area = reset_area(3);
        assert_eq!(area.baby().yaw(), 180.0);
        assert!((area.baby().position().y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn eating_unknown_fish_grants_nothing() {
        let mut area = reset_area(4);
        assert_eq!(area.on_fish_collision(FishId(42)), None);
        assert!(!area.penguin().is_carrying());
        assert_eq!(area.penguin().cumulative_reward(), 0.0);
    }

    #[test]
    fn feed_spawns_two_effects_that_expire() {
        let mut area = reset_area(5);
        area.on_fish_collision(FishId(0)).unwrap();
        let event = area.feed_baby(FeedSource::Direct).unwrap();
        assert_eq!(
            event,
            EpisodeEvent::BabyFed {
                source: FeedSource::Direct,
                remaining_fish: 3
            }
        );
        assert_eq!(area.effects().len(), 2);
        let heart = area
            .effects()
            .iter()
            .find(|e| e.kind == EffectKind::Heart)
            .unwrap();
        assert_eq!(heart.position, area.baby().position() + UP);

        for _ in 0..199 {
            area.advance(0.02);
        }
        assert_eq!(area.effects().len(), 2);
        area.advance(0.05);
        assert!(area.effects().is_empty());
    }

    #[test]
    fn contacts_fire_on_enter_only() {
        let mut config = AreaConfig::default();
        config.fish_count = 1;
        let mut area = Area::new(config, 6);
        area.reset(&CurriculumParameters::new().snapshot());
        let fish_pos = area.get_fish(FishId(0)).unwrap().position();
        area.penguin_mut().place(fish_pos, 0.0);

        let entered = area.detect_contacts();
        assert!(entered.contains(&Contact::Fish(FishId(0))));
        let again = area.detect_contacts();
        assert!(!again.contains(&Contact::Fish(FishId(0))));
    }
}
