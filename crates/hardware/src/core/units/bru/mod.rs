//! Branch Resolution Unit (BRU).
//!
//! Resolves conditional branches: evaluates the comparison named by the
//! decoded condition and computes PC-relative targets. There is no prediction;
//! the emulator executes one instruction at a time.

use crate::isa::instruction::BranchCond;

/// Evaluates a branch condition on two register values.
///
/// # Arguments
///
/// * `cond` - Relation to test.
/// * `a` - Value of `rs1`.
/// * `b` - Value of `rs2`.
///
/// # Returns
///
/// `true` when the branch is taken.
///
/// # Examples
///
/// ```
/// use rv64emu_core::core::units::bru::evaluate;
/// use rv64emu_core::isa::instruction::BranchCond;
///
/// assert!(evaluate(BranchCond::Lt, -1i64 as u64, 0));
/// assert!(!evaluate(BranchCond::Ltu, -1i64 as u64, 0));
/// ```
#[inline]
pub const fn evaluate(cond: BranchCond, a: u64, b: u64) -> bool {
    match cond {
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lt => (a as i64) < (b as i64),
        BranchCond::Ge => (a as i64) >= (b as i64),
        BranchCond::Ltu => a < b,
        BranchCond::Geu => a >= b,
    }
}

/// Computes a PC-relative target with wrapping 64-bit arithmetic.
#[inline]
pub const fn relative_target(pc: u64, offset: i64) -> u64 {
    pc.wrapping_add_signed(offset)
}
