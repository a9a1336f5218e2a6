//! ALU bitwise logical operations.

use super::AluOp;

/// Executes a bitwise logical operation.
///
/// Returns `0` for non-logical opcodes.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        _ => 0,
    }
}
