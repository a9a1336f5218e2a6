//! Replacement Policy Tests.
//!
//! Victim selection for each policy on a single 4-way set, driven through
//! the `ReplacementPolicy` trait the cache uses.

use rv64emu_core::config::ReplacementPolicy as PolicyType;
use rv64emu_core::core::units::cache::policies::{
    FifoPolicy, LruPolicy, RandomPolicy, ReplacementPolicy, build,
};

const WAYS: usize = 4;

fn fill_all(policy: &mut dyn ReplacementPolicy, set: usize) {
    for way in 0..WAYS {
        policy.fill(set, way);
    }
}

#[test]
fn lru_tracks_hits() {
    let mut lru = LruPolicy::new(2, WAYS);
    fill_all(&mut lru, 0);
    lru.update(0, 0);
    lru.update(0, 1);
    assert_eq!(lru.get_victim(0), 2);
}

#[test]
fn lru_sets_are_independent() {
    let mut lru = LruPolicy::new(2, WAYS);
    fill_all(&mut lru, 0);
    fill_all(&mut lru, 1);
    lru.update(1, 0);
    assert_eq!(lru.get_victim(0), 0);
    assert_eq!(lru.get_victim(1), 1);
}

#[test]
fn fifo_ignores_hits() {
    let mut fifo = FifoPolicy::new(1, WAYS);
    fill_all(&mut fifo, 0);
    fifo.update(0, 0);
    assert_eq!(fifo.get_victim(0), 0);

    fifo.fill(0, 0);
    assert_eq!(fifo.get_victim(0), 1);
}

#[test]
fn random_stays_in_range_and_is_reproducible() {
    let mut first = RandomPolicy::new(WAYS);
    let picks: Vec<usize> = (0..32).map(|_| first.get_victim(0)).collect();
    assert!(picks.iter().all(|&way| way < WAYS));

    first.reset();
    let again: Vec<usize> = (0..32).map(|_| first.get_victim(0)).collect();
    assert_eq!(picks, again);
}

#[test]
fn reset_restores_initial_choice() {
    for kind in [PolicyType::Lru, PolicyType::Fifo] {
        let mut policy = build(kind, 1, WAYS);
        fill_all(policy.as_mut(), 0);
        policy.update(0, 0);
        policy.reset();
        assert_eq!(policy.get_victim(0), 0, "{kind:?}");
    }
}
