//! Shared curriculum parameter table for Rookery environments.
//!
//! A training supervisor raises difficulty over time by pushing new values
//! for named parameters (`fish_speed`, `feed_radius`). Every environment
//! holds a clone of the same [`CurriculumParameters`] handle and reads it
//! through [`snapshot()`](CurriculumParameters::snapshot) at episode
//! reset, so a batch pushed with
//! [`set_batch()`](CurriculumParameters::set_batch) is never seen
//! half-applied and never changes an episode already in progress.
//!
//! Names that were never set read as `0.0`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use indexmap::IndexMap;
use rookery_core::ParameterVersion;
use tracing::{trace, warn};

/// Base swimming speed given to newly spawned fish.
pub const FISH_SPEED: &str = "fish_speed";

/// Distance under which the per-tick proximity check feeds the baby.
pub const FEED_RADIUS: &str = "feed_radius";

type Handler = Box<dyn FnMut(f32) + Send>;

#[derive(Default)]
struct Table {
    values: IndexMap<String, f32>,
    version: ParameterVersion,
}

/// Cloneable handle over one process-wide parameter table.
///
/// Clones share the table and the subscriber list. Writers are
/// serialized; readers never wait on subscriber callbacks.
#[derive(Clone, Default)]
pub struct CurriculumParameters {
    table: Arc<RwLock<Table>>,
    // Held across apply + notify so callbacks observe updates in the
    // order they were applied to the table.
    subscribers: Arc<Mutex<IndexMap<String, Vec<Handler>>>>,
}

impl CurriculumParameters {
    /// Create an empty table at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with `values`, still at version 0.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        let params = Self::new();
        {
            let mut table = params.table.write().unwrap_or_else(PoisonError::into_inner);
            for (name, value) in values {
                table.values.insert(name.into(), value);
            }
        }
        params
    }

    /// Set one parameter. Equivalent to a one-element
    /// [`set_batch`](Self::set_batch).
    pub fn set(&self, name: impl Into<String>, value: f32) -> ParameterVersion {
        self.set_batch([(name, value)])
    }

    /// Apply several values as one atomic update.
    ///
    /// The version is bumped once for the whole batch. Non-finite values
    /// are dropped with a warning; if nothing remains the table and its
    /// version are left untouched. Subscribers of each applied name are
    /// notified after the table lock is released.
    ///
    /// Subscriber callbacks must not call back into `set`/`set_batch` on
    /// the same table.
    pub fn set_batch<I, K>(&self, params: I) -> ParameterVersion
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        let applied: Vec<(String, f32)> = params
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .filter(|(name, value)| {
                if value.is_finite() {
                    true
                } else {
                    warn!(parameter = %name, value, "ignoring non-finite curriculum value");
                    false
                }
            })
            .collect();

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let version = {
            let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
            if applied.is_empty() {
                return table.version;
            }
            for (name, value) in &applied {
                table.values.insert(name.clone(), *value);
            }
            table.version = ParameterVersion(table.version.0 + 1);
            table.version
        };

        for (name, value) in &applied {
            trace!(parameter = %name, value, %version, "curriculum parameter updated");
            if let Some(handlers) = subscribers.get_mut(name) {
                for handler in handlers.iter_mut() {
                    handler(*value);
                }
            }
        }
        version
    }

    /// Current value of `name`, or `0.0` if it was never set.
    pub fn get(&self, name: &str) -> f32 {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table.values.get(name).copied().unwrap_or(0.0)
    }

    /// Current table version.
    pub fn version(&self) -> ParameterVersion {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version
    }

    /// Consistent copy of every value and the version they belong to.
    pub fn snapshot(&self) -> ParameterSnapshot {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        ParameterSnapshot {
            values: table.values.clone(),
            version: table.version,
        }
    }

    /// Register `handler` to be called with every value applied to `name`.
    ///
    /// Handlers run on the thread that performed the update.
    pub fn subscribe(&self, name: impl Into<String>, handler: impl FnMut(f32) + Send + 'static) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.into())
            .or_default()
            .push(Box::new(handler));
    }
}

impl fmt::Debug for CurriculumParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("CurriculumParameters")
            .field("version", &snapshot.version)
            .field("values", &snapshot.values)
            .finish()
    }
}

/// Point-in-time copy of the parameter table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSnapshot {
    values: IndexMap<String, f32>,
    version: ParameterVersion,
}

impl ParameterSnapshot {
    /// Value of `name` at snapshot time, or `0.0` if unset.
    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Version of the table this snapshot was taken from.
    pub fn version(&self) -> ParameterVersion {
        self.version
    }

    /// Shorthand for [`FISH_SPEED`].
    pub fn fish_speed(&self) -> f32 {
        self.get(FISH_SPEED)
    }

    /// Shorthand for [`FEED_RADIUS`].
    pub fn feed_radius(&self) -> f32 {
        self.get(FEED_RADIUS)
    }

    /// Iterate over `(name, value)` in first-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of parameters that have been set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameter has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    #[test]
    fn unset_names_read_zero() {
        let params = CurriculumParameters::new();
        assert_eq!(params.get(FISH_SPEED), 0.0);
        assert_eq!(params.version(), ParameterVersion(0));
        assert!(params.snapshot().is_empty());
    }

    #[test]
    fn set_bumps_version_and_is_shared_by_clones() {
        let params = CurriculumParameters::new();
        let supervisor = params.clone();
        assert_eq!(supervisor.set(FEED_RADIUS, 2.5), ParameterVersion(1));
        assert_eq!(params.get(FEED_RADIUS), 2.5);
        assert_eq!(params.snapshot().feed_radius(), 2.5);
    }

    #[test]
    fn batch_is_one_version() {
        let params = CurriculumParameters::new();
        let v = params.set_batch([(FISH_SPEED, 0.5), (FEED_RADIUS, 1.0)]);
        assert_eq!(v, ParameterVersion(1));
        let snap = params.snapshot();
        assert_eq!(snap.fish_speed(), 0.5);
        assert_eq!(snap.feed_radius(), 1.0);
        assert_eq!(snap.iter().count(), 2);
    }

    #[test]
    fn snapshot_is_frozen() {
        let params = CurriculumParameters::with_values([(FISH_SPEED, 1.0)]);
        let snap = params.snapshot();
        params.set(FISH_SPEED, 3.0);
        assert_eq!(snap.fish_speed(), 1.0);
        assert_eq!(snap.version(), ParameterVersion(0));
        assert_eq!(params.get(FISH_SPEED), 3.0);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let params = CurriculumParameters::new();
        params.set(FEED_RADIUS, 1.0);
        let v = params.set(FEED_RADIUS, f32::NAN);
        assert_eq!(v, ParameterVersion(1));
        assert_eq!(params.get(FEED_RADIUS), 1.0);

        let v = params.set_batch([(FEED_RADIUS, f32::INFINITY), (FISH_SPEED, 2.0)]);
        assert_eq!(v, ParameterVersion(2));
        assert_eq!(params.get(FEED_RADIUS), 1.0);
        assert_eq!(params.get(FISH_SPEED), 2.0);
    }

    #[test]
    fn subscribers_see_their_key_only() {
        let params = CurriculumParameters::new();
        let seen = Arc::new(AtomicU32::new(0));
        let sink = Arc::clone(&seen);
        params.subscribe(FISH_SPEED, move |v| sink.store(v.to_bits(), Ordering::SeqCst));

        params.set(FEED_RADIUS, 9.0);
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        params.set(FISH_SPEED, 0.75);
        assert_eq!(f32::from_bits(seen.load(Ordering::SeqCst)), 0.75);
    }

    #[test]
    fn subscriber_may_read_table() {
        let params = CurriculumParameters::new();
        let reader = params.clone();
        let seen = Arc::new(AtomicU32::new(0));
        let sink = Arc::clone(&seen);
        params.subscribe(FEED_RADIUS, move |_| {
            sink.store(reader.get(FEED_RADIUS).to_bits(), Ordering::SeqCst);
        });
        params.set(FEED_RADIUS, 4.0);
        assert_eq!(f32::from_bits(seen.load(Ordering::SeqCst)), 4.0);
    }

    proptest::proptest! {
        #[test]
        fn last_write_wins_and_versions_count_writes(
            values in proptest::collection::vec(-100.0f32..100.0, 1..50),
        ) {
            let params = CurriculumParameters::new();
            for v in &values {
                params.set(FISH_SPEED, *v);
            }
            proptest::prop_assert_eq!(params.get(FISH_SPEED), values[values.len() - 1]);
            proptest::prop_assert_eq!(params.version(), ParameterVersion(values.len() as u64));
        }
    }

    #[test]
    fn concurrent_batches_are_never_torn() {
        let params = CurriculumParameters::new();
        let writer = params.clone();
        let handle = thread::spawn(move || {
            for i in 0..500 {
                let v = i as f32;
                writer.set_batch([(FISH_SPEED, v), (FEED_RADIUS, v)]);
            }
        });
        for _ in 0..500 {
            let snap = params.snapshot();
            assert_eq!(snap.fish_speed(), snap.feed_radius());
        }
        handle.join().unwrap();
        assert_eq!(params.version(), ParameterVersion(500));
    }
}
