//! CPU / Instruction Cache Interaction.
//!
//! Uses a `mockall` cache to pin down when the CPU consults its cache
//! collaborator, and the real `CacheSim` to check that caching never changes
//! what a program computes.

use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rv64emu_core::AnalysisCounters;
use rv64emu_core::core::units::cache::CacheStats;

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::{RAM_BASE, TestContext, test_config};
use crate::common::mocks::icache::MockICache;

fn ib() -> InstructionBuilder {
    InstructionBuilder::new()
}

fn add_one() -> Vec<u32> {
    vec![ib().addi(10, 10, 1).build(), ib().ret().build()]
}

#[test]
fn initialize_inits_cache_once() {
    let mut cache = MockICache::new();
    let _ = cache.expect_init().times(1).return_const(());
    let mut ctx = TestContext::with_icache(Box::new(cache), true).load_program(&add_one());
    ctx.initialize([0; 4]);
}

#[test]
fn enabled_cache_serves_every_fetch() {
    let mut cache = MockICache::new();
    let _ = cache.expect_init().return_const(());
    let _ = cache
        .expect_lookup()
        .withf(|_, addr| *addr == RAM_BASE)
        .times(1)
        .returning(|bus, addr| bus.fetch_u32(addr));
    let _ = cache
        .expect_lookup()
        .withf(|_, addr| *addr == RAM_BASE + 4)
        .times(1)
        .returning(|bus, addr| bus.fetch_u32(addr));

    let mut ctx = TestContext::with_icache(Box::new(cache), true).load_program(&add_one());
    assert_eq!(ctx.run([41, 0, 0, 0]).unwrap(), 42);
}

#[test]
fn cache_supplies_the_executed_word() {
    // The cache answers with `li a0, 7` regardless of memory contents.
    let li = ib().li(10, 7).build();
    let ret = ib().ret().build();
    let mut cache = MockICache::new();
    let _ = cache.expect_init().return_const(());
    let _ = cache
        .expect_lookup()
        .withf(|_, addr| *addr == RAM_BASE)
        .returning(move |_, _| Ok(li));
    let _ = cache
        .expect_lookup()
        .withf(|_, addr| *addr == RAM_BASE + 4)
        .returning(move |_, _| Ok(ret));

    let mut ctx = TestContext::with_icache(Box::new(cache), true).load_program(&add_one());
    assert_eq!(ctx.run([41, 0, 0, 0]).unwrap(), 7);
}

#[test]
fn disabled_cache_is_never_consulted() {
    let mut cache = MockICache::new();
    let _ = cache.expect_init().return_const(());
    let _ = cache.expect_lookup().never();
    let _ = cache.expect_invalidate().never();
    let _ = cache.expect_stats().return_const(CacheStats::default());

    let mut ctx = TestContext::with_icache(Box::new(cache), false)
        .load_program(&[ib().sd(2, 10, -8).build(), ib().ret().build()]);
    assert_eq!(ctx.run([5, 0, 0, 0]).unwrap(), 5);
    assert_eq!(ctx.cpu.analysis().icache, None);
}

#[test]
fn store_invalidates_its_byte_range() {
    let mut cache = MockICache::new();
    let _ = cache.expect_init().return_const(());
    let _ = cache
        .expect_lookup()
        .returning(|bus, addr| bus.fetch_u32(addr));

    let sp = test_config().memory.stack_top();
    let _ = cache
        .expect_invalidate()
        .with(eq(sp - 8), eq(8))
        .times(1)
        .return_const(());

    let mut ctx = TestContext::with_icache(Box::new(cache), true)
        .load_program(&[ib().sd(2, 10, -8).build(), ib().ret().build()]);
    assert_eq!(ctx.run([5, 0, 0, 0]).unwrap(), 5);
}

#[test]
fn analysis_reports_collaborator_stats() {
    let expected = CacheStats {
        hits: 3,
        misses: 1,
        invalidations: 0,
    };
    let mut cache = MockICache::new();
    let _ = cache.expect_init().return_const(());
    let _ = cache
        .expect_lookup()
        .returning(|bus, addr| bus.fetch_u32(addr));
    let _ = cache.expect_stats().return_const(expected);

    let mut ctx = TestContext::with_icache(Box::new(cache), true).load_program(&add_one());
    let _ = ctx.run([0; 4]).unwrap();
    assert_eq!(ctx.cpu.analysis().icache, Some(expected));
    assert_eq!(ctx.cpu.icache_stats(), expected);
}

// ══════════════════════════════════════════════════════════
// CacheSim transparency
// ══════════════════════════════════════════════════════════

/// Sums `n + (n-1) + ... + 1`; the loop body re-fetches the same lines.
fn sum_loop() -> Vec<u32> {
    vec![
        ib().li(11, 0).build(),
        ib().beq(10, 0, 16).build(),
        ib().add(11, 11, 10).build(),
        ib().addi(10, 10, -1).build(),
        ib().jal(0, -12).build(),
        ib().addi(10, 11, 0).build(),
        ib().ret().build(),
    ]
}

#[test]
fn cache_sim_does_not_change_results() {
    let mut plain = TestContext::new().load_program(&sum_loop());
    let plain_ret = plain.run([20, 0, 0, 0]).unwrap();

    let mut config = test_config();
    config.icache.enabled = true;
    config.icache.size_bytes = 64;
    config.icache.line_bytes = 16;
    config.icache.ways = 2;
    let mut cached = TestContext::with_config(&config).load_program(&sum_loop());
    let cached_ret = cached.run([20, 0, 0, 0]).unwrap();

    assert_eq!(cached_ret, plain_ret);
    assert_eq!(cached_ret, 210);

    let analysis = cached.cpu.analysis();
    let cache = analysis.icache.unwrap();
    assert_eq!(cache.accesses(), analysis.instructions);
    assert_eq!(cache.misses, 2, "the program spans two 16-byte lines");
    assert_eq!(
        AnalysisCounters {
            icache: None,
            ..analysis
        },
        plain.cpu.analysis()
    );
}

#[test]
fn self_modifying_store_is_seen_by_next_fetch() {
    // 0: sw a1, 8(a2)  overwrites the instruction at 8
    // 4: jal zero, 4
    // 8: addi a0, a0, 100  (replaced by `addi a0, a0, 1`)
    // 12: ret
    let patched = ib().addi(10, 10, 1).build();
    let program = [
        ib().sw(12, 11, 8).build(),
        ib().jal(0, 4).build(),
        ib().addi(10, 10, 100).build(),
        ib().ret().build(),
    ];

    let mut config = test_config();
    config.icache.enabled = true;
    let mut ctx = TestContext::with_config(&config).load_program(&program);

    assert_eq!(ctx.run([0, patched.into(), RAM_BASE, 0]).unwrap(), 1);
    assert!(ctx.cpu.analysis().icache.unwrap().invalidations >= 1);
}

#[test]
fn misaligned_store_across_three_small_lines() {
    // 0:  jal t1, 8          run the word at 8 once, return to 4
    // 4:  jal zero, 12
    // 8:  addi a0, a0, 1     patched to `addi a0, a0, 100`
    // 12: jalr zero, 0(t1)
    // 16: sd a1, -2(a2)      writes bytes [6, 14)
    // 20: jal t1, -12        run the word at 8 again, return to 24
    // 24: ret
    let program = [
        ib().jal(6, 8).build(),
        ib().jal(0, 12).build(),
        ib().addi(10, 10, 1).build(),
        ib().jalr(0, 6, 0).build(),
        ib().sd(12, 11, -2).build(),
        ib().jal(6, -12).build(),
        ib().ret().build(),
    ];
    let patched = ib().addi(10, 10, 100).build();
    // Keep the neighbouring halves of the words at 4 and 12 intact.
    let value = u64::from(program[1] >> 16)
        | (u64::from(patched) << 16)
        | (u64::from(program[3] & 0xFFFF) << 48);
    let args = [0, value, RAM_BASE + 8, 0];

    let mut plain = TestContext::new().load_program(&program);
    assert_eq!(plain.run(args).unwrap(), 101);

    let mut config = test_config();
    config.icache.enabled = true;
    config.icache.size_bytes = 64;
    config.icache.line_bytes = 4;
    config.icache.ways = 1;
    let mut cached = TestContext::with_config(&config).load_program(&program);
    assert_eq!(cached.run(args).unwrap(), 101);
    assert_eq!(cached.cpu.analysis().icache.unwrap().invalidations, 3);
}
