//! Least Recently Used (LRU) Replacement Policy.
//!
//! Each set keeps an access stamp per way from a per-set counter; the way with
//! the oldest stamp is the victim.
//!
//! - `update()`: O(1)
//! - `get_victim()`: O(W) where W is the number of ways

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug)]
pub struct LruPolicy {
    /// Last-access stamp of every way, `sets * ways` entries.
    stamps: Vec<u64>,
    /// Next stamp to hand out, one counter per set.
    clock: Vec<u64>,
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            stamps: vec![0; sets * ways],
            clock: vec![0; sets],
            ways,
        }
    }
}

impl ReplacementPolicy for LruPolicy {
    fn update(&mut self, set: usize, way: usize) {
        self.clock[set] += 1;
        self.stamps[set * self.ways + way] = self.clock[set];
    }

    fn get_victim(&mut self, set: usize) -> usize {
        let base = set * self.ways;
        self.stamps[base..base + self.ways]
            .iter()
            .enumerate()
            .min_by_key(|&(_, stamp)| *stamp)
            .map_or(0, |(way, _)| way)
    }

    fn reset(&mut self) {
        self.stamps.fill(0);
        self.clock.fill(0);
    }
}
