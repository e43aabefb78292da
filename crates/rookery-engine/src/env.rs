//! Lockstep penguin environment.
//!
//! [`PenguinEnv`] is the user-facing API for driving one training area.
//! Each call to [`step()`](PenguinEnv::step) applies an action, advances
//! the area by one tick, resolves eating and feeding, and returns a
//! [`StepResult`] describing what happened.
//!
//! # Tick order
//!
//! 1. Move the penguin, then rotate it, then charge the step cost.
//! 2. Advance the area clock, swim the fish, expire effects.
//! 3. Feed the baby if it is closer than `feed_radius`.
//! 4. Resolve contacts that began this tick: fish first, then the baby.
//! 5. Truncate if the step limit is reached and the episode is not done.
//!
//! # Host-driven collisions
//!
//! A host that runs its own physics can skip contact detection entirely
//! and report collisions through [`on_fish_collision`](PenguinEnv::on_fish_collision),
//! [`on_baby_collision`](PenguinEnv::on_baby_collision) and
//! [`feed_baby`](PenguinEnv::feed_baby). Their rewards and events are
//! reported by the next [`step()`](PenguinEnv::step).

use rookery_core::{
    Action, ActionError, Environment, EpisodeEvent, EpisodeId, FeedSource, FishId,
    HeuristicInput, Observation, StepEvents, StepResult, TickId,
};
use rookery_curriculum::CurriculumParameters;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::area::{Area, Contact};
use crate::config::{ConfigError, EnvConfig, FeedTrigger};
use crate::metrics::EpisodeMetrics;
use crate::penguin::Penguin;

// Compile-time assertion: PenguinEnv can be moved to a worker thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<PenguinEnv>();
    }
};

// ── EnvError ───────────────────────────────────────────────────────

/// Errors returned by [`PenguinEnv::step()`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EnvError {
    /// The episode is done or truncated. Call `reset` first.
    #[error("episode {episode} is over; reset before stepping")]
    EpisodeOver {
        /// The finished episode.
        episode: EpisodeId,
    },
    /// A raw action vector was malformed.
    #[error("malformed action: {0}")]
    Action(#[from] ActionError),
}

// ── PenguinEnv ─────────────────────────────────────────────────────

/// One penguin, one baby, and a handful of fish, stepped in lockstep.
///
/// Created from an [`EnvConfig`] and a shared [`CurriculumParameters`]
/// handle. The curriculum is sampled once per reset: `fish_speed` for
/// the newly spawned fish and `feed_radius` for the proximity check.
/// Updates published mid-episode take effect at the next reset.
///
/// # Example
///
/// ```ignore
/// let mut env = PenguinEnv::new(EnvConfig::with_seed(7), CurriculumParameters::new())?;
/// loop {
///     let result = env.step(policy(env.observe()))?;
///     if result.is_terminal() {
///         env.reset(next_seed());
///     }
/// }
/// ```
pub struct PenguinEnv {
    config: EnvConfig,
    area: Area,
    params: CurriculumParameters,
    step_cost: f32,
    feed_radius: f32,
    seed: u64,
    episode: EpisodeId,
    tick: TickId,
    truncated: bool,
    pending: StepEvents,
    metrics: EpisodeMetrics,
    last_episode: Option<EpisodeMetrics>,
}

impl PenguinEnv {
    /// Create an environment and start its first episode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: EnvConfig, params: CurriculumParameters) -> Result<Self, ConfigError> {
        config.validate()?;
        let area = Area::new(config.area.clone(), config.seed);
        let mut env = Self {
            step_cost: config.step_cost(),
            seed: config.seed,
            config,
            area,
            params,
            feed_radius: 0.0,
            episode: EpisodeId(0),
            tick: TickId(0),
            truncated: false,
            pending: StepEvents::new(),
            metrics: EpisodeMetrics::default(),
            last_episode: None,
        };
        env.begin_episode();
        Ok(env)
    }

    /// Reseed the placement stream and start a new episode.
    ///
    /// Two environments built from the same config and reset with the
    /// same seed produce identical trajectories under identical actions.
    pub fn reset(&mut self, seed: u64) -> Observation {
        self.seed = seed;
        self.area.reseed(seed);
        self.begin_episode()
    }

    /// Start a new episode without reseeding.
    pub fn restart(&mut self) -> Observation {
        self.begin_episode()
    }

    fn begin_episode(&mut self) -> Observation {
        if self.metrics.steps > 0 && !self.is_terminal() {
            debug!(
                episode = %self.episode,
                steps = self.metrics.steps,
                "episode abandoned"
            );
            self.last_episode = Some(self.metrics.clone());
        }

        let params = self.params.snapshot();
        self.area.reset(&params);
        self.feed_radius = params.feed_radius();

        self.episode = EpisodeId(self.episode.0 + 1);
        self.tick = TickId(0);
        self.truncated = false;
        self.pending.clear();
        self.metrics = EpisodeMetrics::new(self.episode);

        debug!(
            episode = %self.episode,
            seed = self.seed,
            params_version = %params.version(),
            feed_radius = self.feed_radius,
            "episode started"
        );
        self.area.observe()
    }

    /// Apply `action` and advance one tick.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::EpisodeOver`] once the episode is done or
    /// truncated. Nothing is changed in that case.
    pub fn step(&mut self, action: Action) -> Result<StepResult, EnvError> {
        if self.is_terminal() {
            return Err(EnvError::EpisodeOver {
                episode: self.episode,
            });
        }

        self.tick = TickId(self.tick.0 + 1);
        let cfg = &self.config;
        self.area.penguin_mut().act(
            action,
            cfg.dt,
            cfg.move_speed,
            cfg.turn_speed,
            self.step_cost,
        );
        self.area.advance(cfg.dt);

        let mut events = std::mem::take(&mut self.pending);

        if self.area.distance_to_baby() < self.feed_radius {
            if let Some(event) = self.area.feed_baby(FeedSource::Proximity) {
                self.record(event);
                events.push(event);
            }
        }

        for contact in self.area.detect_contacts() {
            let event = match contact {
                Contact::Fish(id) => self.area.on_fish_collision(id),
                Contact::Baby if self.accepts_contact_feeds() => {
                    self.area.feed_baby(FeedSource::Contact)
                }
                Contact::Baby => None,
            };
            if let Some(event) = event {
                self.record(event);
                events.push(event);
            }
        }

        let done = self.area.penguin().is_done();
        if !done && self.area.penguin().step_count() >= self.config.max_steps {
            self.truncated = true;
        }

        let reward = self.area.penguin_mut().take_tick_reward();
        let cumulative_reward = self.area.penguin().cumulative_reward();
        self.metrics.steps = self.area.penguin().step_count();
        self.metrics.cumulative_reward = cumulative_reward;

        if done || self.truncated {
            self.finish_episode();
        }

        Ok(StepResult {
            tick: self.tick,
            observation: self.area.observe(),
            reward,
            cumulative_reward,
            done,
            truncated: self.truncated,
            events,
        })
    }

    /// Decode a raw `[throttle, turn]` vector and step.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Action`] for a malformed vector, or
    /// [`EnvError::EpisodeOver`] as [`step()`](Self::step) does.
    pub fn step_raw(&mut self, raw: &[f32]) -> Result<StepResult, EnvError> {
        let action = Action::from_slice(raw)?;
        self.step(action)
    }

    /// Observe the current state.
    pub fn observe(&self) -> Observation {
        self.area.observe()
    }

    /// Map manual key input to an action.
    pub fn heuristic_action(input: HeuristicInput) -> Action {
        Action::heuristic(input)
    }

    // ── Host hooks ──────────────────────────────────────────────────

    /// Report that the penguin touched fish `id`.
    ///
    /// Eats the fish if the penguin is empty-handed and the fish is live.
    /// Returns the event, or `None` if nothing happened.
    pub fn on_fish_collision(&mut self, id: FishId) -> Option<EpisodeEvent> {
        if self.is_terminal() {
            return None;
        }
        let event = self.area.on_fish_collision(id)?;
        self.accept_hook_event(event);
        Some(event)
    }

    /// Report that the penguin touched the baby.
    ///
    /// Ignored under [`FeedTrigger::ProximityOnly`].
    pub fn on_baby_collision(&mut self) -> Option<EpisodeEvent> {
        if !self.accepts_contact_feeds() {
            return None;
        }
        self.host_feed(FeedSource::Contact)
    }

    /// Deliver the carried fish to the baby regardless of distance.
    ///
    /// If this delivers the last fish the episode is done immediately:
    /// [`is_done()`](Self::is_done) turns true and the next
    /// [`step()`](Self::step) returns [`EnvError::EpisodeOver`].
    pub fn feed_baby(&mut self) -> Option<EpisodeEvent> {
        self.host_feed(FeedSource::Direct)
    }

    /// Remove a live fish without eating it. Returns `false` if the fish
    /// is not live.
    pub fn remove_fish(&mut self, id: FishId) -> bool {
        self.area.remove_fish(id)
    }

    fn host_feed(&mut self, source: FeedSource) -> Option<EpisodeEvent> {
        if self.is_terminal() {
            return None;
        }
        let event = self.area.feed_baby(source)?;
        self.accept_hook_event(event);
        if self.area.penguin().is_done() {
            self.metrics.cumulative_reward = self.area.penguin().cumulative_reward();
            self.finish_episode();
        }
        Some(event)
    }

    fn accept_hook_event(&mut self, event: EpisodeEvent) {
        self.record(event);
        self.pending.push(event);
    }

    fn accepts_contact_feeds(&self) -> bool {
        self.config.feed_trigger == FeedTrigger::ProximityAndContact
    }

    fn record(&mut self, event: EpisodeEvent) {
        trace!(episode = %self.episode, tick = %self.tick, ?event, "episode event");
        self.metrics.record(&event);
    }

    fn finish_episode(&mut self) {
        self.metrics.done = self.area.penguin().is_done();
        self.metrics.truncated = self.truncated;
        info!(
            episode = %self.episode,
            steps = self.metrics.steps,
            reward = self.metrics.cumulative_reward,
            fish_eaten = self.metrics.fish_eaten,
            feeds = self.metrics.feeds(),
            done = self.metrics.done,
            truncated = self.metrics.truncated,
            "episode finished"
        );
        self.last_episode = Some(self.metrics.clone());
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The area being simulated.
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// The penguin.
    pub fn penguin(&self) -> &Penguin {
        self.area.penguin()
    }

    /// Configuration this environment was built from.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Shared curriculum handle.
    pub fn params(&self) -> &CurriculumParameters {
        &self.params
    }

    /// Proximity feed radius sampled at the last reset.
    pub fn feed_radius(&self) -> f32 {
        self.feed_radius
    }

    /// Ticks taken this episode (0 right after a reset).
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Current episode number, starting at 1.
    pub fn episode(&self) -> EpisodeId {
        self.episode
    }

    /// Seed of the last reset.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Live fish count.
    pub fn remaining_fish(&self) -> usize {
        self.area.remaining_fish()
    }

    /// Sum of rewards since the episode started.
    pub fn cumulative_reward(&self) -> f32 {
        self.area.penguin().cumulative_reward()
    }

    /// The last fish was delivered.
    pub fn is_done(&self) -> bool {
        self.area.penguin().is_done()
    }

    /// The step limit was reached.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Done or truncated.
    pub fn is_terminal(&self) -> bool {
        self.is_done() || self.truncated
    }

    /// Running counters for the current episode.
    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }

    /// Final counters of the most recently finished or abandoned episode.
    pub fn last_episode(&self) -> Option<&EpisodeMetrics> {
        self.last_episode.as_ref()
    }
}

impl Environment for PenguinEnv {
    type Error = EnvError;

    fn on_episode_start(&mut self) -> Observation {
        self.restart()
    }

    fn on_tick(&mut self, action: Action) -> Result<StepResult, EnvError> {
        self.step(action)
    }

    fn compute_observations(&self) -> Observation {
        self.observe()
    }
}

impl std::fmt::Debug for PenguinEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PenguinEnv")
            .field("episode", &self.episode)
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .field("remaining_fish", &self.area.remaining_fish())
            .field("done", &self.is_done())
            .field("truncated", &self.truncated)
            .finish()
    }
}
