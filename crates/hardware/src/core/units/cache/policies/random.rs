//! Random Replacement Policy.
//!
//! Picks the victim with a xorshift generator. The seed is fixed so runs are
//! reproducible.

use super::ReplacementPolicy;

/// Initial generator state.
const SEED: u64 = 0x2545_F491_4F6C_DD1D;

/// Random Policy state.
#[derive(Debug)]
pub struct RandomPolicy {
    ways: usize,
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance for a cache with `ways` ways.
    pub const fn new(ways: usize) -> Self {
        Self { ways, state: SEED }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn update(&mut self, _set: usize, _way: usize) {}

    fn get_victim(&mut self, _set: usize) -> usize {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % self.ways as u64) as usize
    }

    fn reset(&mut self) {
        self.state = SEED;
    }
}
