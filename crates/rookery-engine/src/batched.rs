//! Batched environments for vectorized RL training.
//!
//! [`BatchedEnv`] owns N [`PenguinEnv`]s that share one
//! [`CurriculumParameters`] handle and steps them all in a single call.
//! Observations are written into a caller-owned contiguous buffer, N
//! rows of [`OBSERVATION_LEN`] values.
//!
//! Environments whose episode ends during [`step_all()`](BatchedEnv::step_all)
//! are restarted immediately, so the batch never stalls on a finished
//! environment. The returned [`StepResult`] still describes the final
//! tick of the old episode; the buffer written by
//! [`observe_into()`](BatchedEnv::observe_into) holds the first
//! observation of the new one.
//!
//! Stepping is sequential. Every check that can fail runs before any
//! environment is stepped, so an error never leaves the batch half
//! advanced.

use rookery_core::{Action, ActionError, StepResult, ACTION_LEN, OBSERVATION_LEN};
use rookery_curriculum::CurriculumParameters;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, EnvConfig};
use crate::env::{EnvError, PenguinEnv};

// ── Error type ─────────────────────────────────────────────────────

/// Error from a batched operation, annotated with the failing env index.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BatchError {
    /// An environment's `step()` failed.
    #[error("env {index}: {source}")]
    Env {
        /// Index of the environment that failed (0-based).
        index: usize,
        /// The underlying error.
        source: EnvError,
    },
    /// An environment's config failed validation.
    #[error("env {index}: config error: {source}")]
    Config {
        /// Index of the offending config (0-based).
        index: usize,
        /// The underlying error.
        source: ConfigError,
    },
    /// Environment index out of bounds.
    #[error("env index {index} out of range (num_envs={num_envs})")]
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// Total number of environments.
        num_envs: usize,
    },
    /// Batch-level argument validation failed.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of what's wrong.
        reason: String,
    },
}

// ── BatchedEnv ─────────────────────────────────────────────────────

/// N penguin environments stepped together.
pub struct BatchedEnv {
    envs: Vec<PenguinEnv>,
    params: CurriculumParameters,
    auto_resets: u64,
}

impl BatchedEnv {
    /// Create `num_envs` copies of `base`, seeded `base.seed + i`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] for an empty batch, or
    /// [`BatchError::Config`] if `base` fails validation.
    pub fn new(
        base: EnvConfig,
        num_envs: usize,
        params: CurriculumParameters,
    ) -> Result<Self, BatchError> {
        let configs = (0..num_envs)
            .map(|i| EnvConfig {
                seed: base.seed.wrapping_add(i as u64),
                ..base.clone()
            })
            .collect();
        Self::from_configs(configs, params)
    }

    /// Create one environment per config, all sharing `params`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] if `configs` is empty, or
    /// [`BatchError::Config`] naming the first config that fails
    /// validation.
    pub fn from_configs(
        configs: Vec<EnvConfig>,
        params: CurriculumParameters,
    ) -> Result<Self, BatchError> {
        if configs.is_empty() {
            return Err(BatchError::InvalidArgument {
                reason: "BatchedEnv requires at least one config".into(),
            });
        }
        let mut envs = Vec::with_capacity(configs.len());
        for (index, config) in configs.into_iter().enumerate() {
            let env = PenguinEnv::new(config, params.clone())
                .map_err(|source| BatchError::Config { index, source })?;
            envs.push(env);
        }
        debug!(num_envs = envs.len(), "batched env created");
        Ok(Self {
            envs,
            params,
            auto_resets: 0,
        })
    }

    /// Step every environment with its action, restarting any whose
    /// episode ends.
    ///
    /// `actions` must have exactly [`len()`](Self::len) entries.
    pub fn step_all(&mut self, actions: &[Action]) -> Result<Vec<StepResult>, BatchError> {
        let n = self.envs.len();
        if actions.len() != n {
            return Err(BatchError::InvalidArgument {
                reason: format!("actions has {} entries, expected {n}", actions.len()),
            });
        }

        let mut results = Vec::with_capacity(n);
        for (index, (env, action)) in self.envs.iter_mut().zip(actions).enumerate() {
            let result = env
                .step(*action)
                .map_err(|source| BatchError::Env { index, source })?;
            if result.is_terminal() {
                env.restart();
                self.auto_resets += 1;
            }
            results.push(result);
        }
        Ok(results)
    }

    /// Decode a flat `[throttle, turn]` buffer of `len() * ACTION_LEN`
    /// values and step.
    ///
    /// The whole buffer is decoded before anything is stepped.
    pub fn step_raw_all(&mut self, raw: &[f32]) -> Result<Vec<StepResult>, BatchError> {
        let n = self.envs.len();
        let expected = n * ACTION_LEN;
        if raw.len() != expected {
            return Err(BatchError::InvalidArgument {
                reason: format!("action buffer has {} values, expected {expected}", raw.len()),
            });
        }
        let actions = raw
            .chunks_exact(ACTION_LEN)
            .enumerate()
            .map(|(index, chunk)| {
                Action::from_slice(chunk).map_err(|e: ActionError| BatchError::Env {
                    index,
                    source: e.into(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.step_all(&actions)
    }

    /// Write every environment's current observation into `output`.
    ///
    /// `output` must hold at least `len() * OBSERVATION_LEN` values.
    /// Row `i` belongs to environment `i`.
    pub fn observe_into(&self, output: &mut [f32]) -> Result<(), BatchError> {
        let expected = self.envs.len() * OBSERVATION_LEN;
        if output.len() < expected {
            return Err(BatchError::InvalidArgument {
                reason: format!("output buffer too small: {} < {expected}", output.len()),
            });
        }
        for (env, row) in self.envs.iter().zip(output.chunks_exact_mut(OBSERVATION_LEN)) {
            row.copy_from_slice(env.observe().as_slice());
        }
        Ok(())
    }

    /// Reset a single environment with a new seed.
    pub fn reset_env(&mut self, index: usize, seed: u64) -> Result<(), BatchError> {
        let num_envs = self.envs.len();
        let env = self
            .envs
            .get_mut(index)
            .ok_or(BatchError::InvalidIndex { index, num_envs })?;
        env.reset(seed);
        Ok(())
    }

    /// Reset every environment with per-environment seeds.
    pub fn reset_all(&mut self, seeds: &[u64]) -> Result<(), BatchError> {
        let n = self.envs.len();
        if seeds.len() != n {
            return Err(BatchError::InvalidArgument {
                reason: format!("seeds has {} entries, expected {n}", seeds.len()),
            });
        }
        for (env, &seed) in self.envs.iter_mut().zip(seeds) {
            env.reset(seed);
        }
        Ok(())
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    /// Always `false`: construction rejects empty batches.
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// One environment, by index.
    pub fn env(&self, index: usize) -> Option<&PenguinEnv> {
        self.envs.get(index)
    }

    /// All environments in index order.
    pub fn envs(&self) -> &[PenguinEnv] {
        &self.envs
    }

    /// The shared curriculum handle.
    pub fn params(&self) -> &CurriculumParameters {
        &self.params
    }

    /// Episodes restarted by [`step_all()`](Self::step_all) so far.
    pub fn auto_resets(&self) -> u64 {
        self.auto_resets
    }
}

impl std::fmt::Debug for BatchedEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedEnv")
            .field("num_envs", &self.envs.len())
            .field("auto_resets", &self.auto_resets)
            .field("params_version", &self.params.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookery_core::{EpisodeId, Turn};
    use rookery_curriculum::FISH_SPEED;

    fn batch(n: usize) -> BatchedEnv {
        BatchedEnv::new(EnvConfig::with_seed(100), n, CurriculumParameters::new()).unwrap()
    }

    // ── Construction tests ────────────────────────────────────

    #[test]
    fn seeds_are_consecutive() {
        let b = batch(3);
        let seeds: Vec<u64> = b.envs().iter().map(|e| e.seed()).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
    }

    #[test]
    fn empty_batch_rejected() {
        let err = BatchedEnv::from_configs(vec![], CurriculumParameters::new()).unwrap_err();
        assert!(matches!(err, BatchError::InvalidArgument { .. }));
    }

    #[test]
    fn bad_config_reports_index() {
        let mut bad = EnvConfig::default();
        bad.dt = -1.0;
        let err = BatchedEnv::from_configs(
            vec![EnvConfig::default(), bad],
            CurriculumParameters::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Config { index: 1, .. }));
    }

    #[test]
    fn envs_share_one_curriculum() {
        let b = batch(2);
        b.params().set(FISH_SPEED, 2.0);
        assert_eq!(b.env(1).unwrap().params().get(FISH_SPEED), 2.0);
    }

    // ── Stepping tests ────────────────────────────────────────

    #[test]
    fn step_all_checks_action_count() {
        let mut b = batch(2);
        let err = b.step_all(&[Action::IDLE]).unwrap_err();
        assert!(matches!(err, BatchError::InvalidArgument { .. }));
        assert_eq!(b.env(0).unwrap().current_tick().0, 0);
    }

    #[test]
    fn step_all_advances_every_env() {
        let mut b = batch(3);
        let results = b
            .step_all(&[Action::IDLE, Action::new(1.0, Turn::Left), Action::IDLE])
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(b.envs().iter().all(|e| e.current_tick().0 == 1));
    }

    #[test]
    fn terminal_envs_restart() {
        let config = EnvConfig {
            max_steps: 2,
            ..EnvConfig::with_seed(1)
        };
        let mut b = BatchedEnv::new(config, 2, CurriculumParameters::new()).unwrap();
        b.step_all(&[Action::IDLE; 2]).unwrap();
        let results = b.step_all(&[Action::IDLE; 2]).unwrap();
        assert!(results.iter().all(|r| r.truncated));
        assert_eq!(b.auto_resets(), 2);
        assert!(b.envs().iter().all(|e| e.episode() == EpisodeId(2)));
        // The next step works without an explicit reset.
        assert!(b.step_all(&[Action::IDLE; 2]).is_ok());
    }

    #[test]
    fn step_raw_all_is_atomic_on_bad_input() {
        let mut b = batch(2);
        let err = b.step_raw_all(&[0.0, 0.0, f32::NAN, 0.0]).unwrap_err();
        assert!(matches!(err, BatchError::Env { index: 1, .. }));
        assert!(b.envs().iter().all(|e| e.current_tick().0 == 0));
        assert!(b.step_raw_all(&[1.0, 0.0, 0.0, 2.0]).is_ok());
    }

    // ── Observation tests ─────────────────────────────────────

    #[test]
    fn observe_into_fills_rows() {
        let b = batch(2);
        let mut out = vec![0.0; 2 * OBSERVATION_LEN];
        b.observe_into(&mut out).unwrap();
        for (i, row) in out.chunks_exact(OBSERVATION_LEN).enumerate() {
            assert_eq!(row, b.env(i).unwrap().observe().as_slice());
        }
    }

    #[test]
    fn observe_into_rejects_small_buffer() {
        let b = batch(2);
        let mut out = vec![0.0; OBSERVATION_LEN];
        assert!(b.observe_into(&mut out).is_err());
    }

    #[test]
    fn reset_env_checks_index() {
        let mut b = batch(2);
        assert!(b.reset_env(1, 7).is_ok());
        assert_eq!(b.env(1).unwrap().seed(), 7);
        assert_eq!(
            b.reset_env(2, 7),
            Err(BatchError::InvalidIndex {
                index: 2,
                num_envs: 2
            })
        );
    }
}
