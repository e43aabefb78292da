//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one fish within an area.
///
/// Allocated sequentially by the area when fish are spawned and never
/// reused within the lifetime of that area, so a stale id held across a
/// reset can not alias a freshly spawned fish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FishId(pub u64);

impl fmt::Display for FishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fish#{}", self.0)
    }
}

impl From<u64> for FishId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter within an episode.
///
/// Reset to zero at the start of every episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counts episodes started by an environment, beginning at 1 for the
/// episode prepared at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeId(pub u64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EpisodeId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Tracks the version of the curriculum parameter table.
///
/// Incremented once per applied `set` or `set_batch`, enabling readers to
/// detect whether anything changed since their last snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterVersion(pub u64);

impl fmt::Display for ParameterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParameterVersion {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fish_id_display_is_tagged() {
        assert_eq!(FishId(7).to_string(), "fish#7");
    }

    #[test]
    fn ids_order_numerically() {
        assert!(TickId(2) > TickId(1));
        assert!(ParameterVersion(0) < ParameterVersion(3));
        assert_eq!(EpisodeId::from(4), EpisodeId(4));
    }
}
