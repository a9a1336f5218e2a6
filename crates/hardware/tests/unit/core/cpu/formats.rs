//! Format Executor Tests.
//!
//! Per-format semantics observed through whole programs: load width and
//! extension, store faults, jump linking, and 32-bit arithmetic.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rv64emu_core::common::{AccessType, EmuError};

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::{RAM_BASE, TestContext};

fn ib() -> InstructionBuilder {
    InstructionBuilder::new()
}

/// Data area placed well past the test programs.
const DATA: u64 = RAM_BASE + 0x100;

const PATTERN: u64 = 0x8182_8384_F5F6_F7F8;

#[rstest]
#[case::lb(ib().lb(10, 11, 0), 0xFFFF_FFFF_FFFF_FFF8)]
#[case::lbu(ib().lbu(10, 11, 0), 0xF8)]
#[case::lh(ib().lh(10, 11, 0), 0xFFFF_FFFF_FFFF_F7F8)]
#[case::lhu(ib().lhu(10, 11, 0), 0xF7F8)]
#[case::lw(ib().lw(10, 11, 0), 0xFFFF_FFFF_F5F6_F7F8)]
#[case::lwu(ib().lwu(10, 11, 0), 0xF5F6_F7F8)]
#[case::ld(ib().ld(10, 11, 0), PATTERN)]
#[case::lb_high_byte(ib().lb(10, 11, 7), 0xFFFF_FFFF_FFFF_FF81)]
#[case::lw_upper_half(ib().lw(10, 11, 4), 0xFFFF_FFFF_8182_8384)]
fn load_width_and_extension(#[case] load: InstructionBuilder, #[case] expected: u64) {
    let mut ctx = TestContext::new().load_program(&[load.build(), ib().ret().build()]);
    ctx.cpu.bus.write_u64(DATA, PATTERN).unwrap();

    assert_eq!(ctx.run([0, DATA, 0, 0]).unwrap(), expected);
    assert_eq!(ctx.cpu.stats.loads, 1);
}

#[rstest]
#[case::sb(ib().sb(11, 12, 0), 0xAAAA_AAAA_AAAA_AA88)]
#[case::sh(ib().sh(11, 12, 0), 0xAAAA_AAAA_AAAA_7788)]
#[case::sw(ib().sw(11, 12, 0), 0xAAAA_AAAA_5566_7788)]
#[case::sd(ib().sd(11, 12, 0), 0x1122_3344_5566_7788)]
fn store_writes_only_its_width(#[case] store: InstructionBuilder, #[case] expected: u64) {
    let mut ctx = TestContext::new().load_program(&[store.build(), ib().ret().build()]);
    ctx.cpu.bus.write_u64(DATA, 0xAAAA_AAAA_AAAA_AAAA).unwrap();

    let _ = ctx.run([0, DATA, 0x1122_3344_5566_7788, 0]).unwrap();
    assert_eq!(ctx.cpu.bus.read_u64(DATA).unwrap(), expected);
    assert_eq!(ctx.cpu.stats.stores, 1);
}

#[test]
fn store_to_unmapped_memory_faults() {
    let mut ctx = TestContext::new().load_program(&[ib().sw(11, 10, 0).build(), ib().ret().build()]);
    let err = ctx.run([0, 0x10, 0, 0]).unwrap_err();

    assert_eq!(
        err,
        EmuError::AccessFault {
            addr: 0x10,
            size: 4,
            access: AccessType::Write
        }
    );
    assert_eq!(ctx.cpu.pc, RAM_BASE);
    assert_eq!(ctx.cpu.stats.stores, 0);
    assert_eq!(ctx.cpu.stats.instructions, 1);
}

#[test]
fn load_from_unmapped_memory_faults() {
    let mut ctx = TestContext::new().load_program(&[ib().ld(10, 11, 0).build(), ib().ret().build()]);
    let err = ctx.run([0, 0x20, 0, 0]).unwrap_err();

    assert_eq!(
        err,
        EmuError::AccessFault {
            addr: 0x20,
            size: 8,
            access: AccessType::Read
        }
    );
    assert_eq!(ctx.cpu.stats.loads, 0);
    assert_eq!(ctx.get_reg(10), 0);
}

#[test]
fn jalr_never_writes_link_register() {
    // jalr t0, 0(a1) -> target: ret
    let mut ctx = TestContext::new().load_program(&[
        ib().jalr(5, 11, 0).build(),
        ib().li(10, 99).build(),
        ib().ret().build(),
    ]);
    let target = RAM_BASE + 8;

    assert_eq!(ctx.run([7, target, 0, 0]).unwrap(), 7);
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.cpu.stats.jumps, 2);
}

#[test]
fn jal_links_unless_rd_is_zero() {
    let mut ctx = TestContext::new().load_program(&[
        ib().jal(5, 8).build(),  // 0: link t0, skip one
        ib().li(10, 99).build(), // 4: skipped
        ib().jal(0, 8).build(),  // 8: no link
        ib().li(10, 98).build(), // 12: skipped
        ib().ret().build(),      // 16
    ]);

    assert_eq!(ctx.run([1, 0, 0, 0]).unwrap(), 1);
    assert_eq!(ctx.get_reg(5), RAM_BASE + 4);
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.cpu.stats.jumps, 3);
}

#[test]
fn backward_branch_target() {
    // 0: addi a0, a0, -1 ; 4: bne a0, zero, -4 ; 8: ret
    let mut ctx = TestContext::new().load_program(&[
        ib().addi(10, 10, -1).build(),
        ib().bne(10, 0, -4).build(),
        ib().ret().build(),
    ]);

    assert_eq!(ctx.run([3, 0, 0, 0]).unwrap(), 0);
    assert_eq!(ctx.cpu.stats.branches_taken, 2);
    assert_eq!(ctx.cpu.stats.branches_not_taken, 1);
}

#[rstest]
#[case::addw_wraps(ib().addw(10, 10, 11), 0x7FFF_FFFF, 1, 0xFFFF_FFFF_8000_0000)]
#[case::subw_wraps(ib().subw(10, 10, 11), 0x8000_0000, 1, 0x7FFF_FFFF)]
#[case::sllw(ib().sllw(10, 10, 11), 1, 31, 0xFFFF_FFFF_8000_0000)]
#[case::srlw(ib().srlw(10, 10, 11), 0xFFFF_FFFF_8000_0000, 31, 1)]
#[case::sraw(ib().sraw(10, 10, 11), 0x8000_0000, 4, 0xFFFF_FFFF_F800_0000)]
#[case::mul(ib().mul(10, 10, 11), 6, 7, 42)]
#[case::div_signed(ib().div(10, 10, 11), 0xFFFF_FFFF_FFFF_FFF8, 2, 0xFFFF_FFFF_FFFF_FFFC)]
#[case::rem_signed(ib().rem(10, 10, 11), 0xFFFF_FFFF_FFFF_FFF9, 2, u64::MAX)]
#[case::divu_unsigned(ib().divu(10, 10, 11), 0xFFFF_FFFF_FFFF_FFF8, 2, 0x7FFF_FFFF_FFFF_FFFC)]
#[case::div_by_zero(ib().div(10, 10, 11), 5, 0, u64::MAX)]
#[case::rem_by_zero(ib().rem(10, 10, 11), 5, 0, 5)]
fn register_ops_write_rd(
    #[case] op: InstructionBuilder,
    #[case] a: u64,
    #[case] b: u64,
    #[case] expected: u64,
) {
    let mut ctx = TestContext::new().load_program(&[op.build(), ib().ret().build()]);
    assert_eq!(ctx.run([a, b, 0, 0]).unwrap(), expected);
    assert_eq!(ctx.cpu.stats.alu, 1);
}
