//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a set-associative cache.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Random`: Pseudo-random selection.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send {
    /// Records a hit on `way` of `set`.
    fn update(&mut self, set: usize, way: usize);

    /// Records that `way` of `set` was just filled with a new line.
    fn fill(&mut self, set: usize, way: usize) {
        self.update(set, way);
    }

    /// Selects the way of `set` to evict.
    ///
    /// Only consulted when every way of the set holds a valid line.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Returns the policy to its freshly constructed state.
    fn reset(&mut self);
}

/// Builds the policy selected by configuration.
pub fn build(kind: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
        PolicyType::Fifo => Box::new(FifoPolicy::new(sets, ways)),
        PolicyType::Random => Box::new(RandomPolicy::new(ways)),
    }
}
