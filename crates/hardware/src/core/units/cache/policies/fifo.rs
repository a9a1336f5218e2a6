//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the oldest line in a set regardless of how recently it was read.
//! Each set keeps a round-robin pointer that advances whenever the way it
//! points at is filled. Hits do not move it.

use super::ReplacementPolicy;

/// FIFO Policy state.
#[derive(Debug)]
pub struct FifoPolicy {
    /// Next way to be evicted, one pointer per set.
    next_way: Vec<usize>,
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; sets],
            ways,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not move the pointer.
    fn update(&mut self, _set: usize, _way: usize) {}

    /// Advances the pointer past `way` when it is the current pointer.
    fn fill(&mut self, set: usize, way: usize) {
        if self.next_way[set] == way {
            self.next_way[set] = (way + 1) % self.ways;
        }
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.next_way[set]
    }

    fn reset(&mut self) {
        self.next_way.fill(0);
    }
}
