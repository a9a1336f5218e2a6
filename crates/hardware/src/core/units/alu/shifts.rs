//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA) for both the 64-bit and the W-suffix forms.
//!
//! Shift amounts are masked to 6 bits (0-63) for 64-bit shifts and 5 bits
//! (0-31) for word shifts. Word results are sign-extended from bit 31.

use super::AluOp;

/// Bit mask for the 64-bit shift amount (6 bits: 0-63).
const SHAMT_MASK_64: u64 = 0x3f;

/// Bit mask for the word shift amount (5 bits: 0-31).
const SHAMT_MASK_32: u64 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op`   - The ALU operation to perform (must be a shift variant).
/// * `a`    - The value to be shifted (64-bit).
/// * `b`    - The shift amount (lower bits used, upper bits ignored).
/// * `is32` - If true, perform the 32-bit (W-suffix) variant.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-shift opcodes.
pub const fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
    let sh64 = (b & SHAMT_MASK_64) as u32;
    let sh32 = (b & SHAMT_MASK_32) as u32;
    match op {
        AluOp::Sll => {
            if is32 {
                ((a as u32) << sh32) as i32 as i64 as u64
            } else {
                a << sh64
            }
        }
        AluOp::Srl => {
            if is32 {
                ((a as u32) >> sh32) as i32 as i64 as u64
            } else {
                a >> sh64
            }
        }
        AluOp::Sra => {
            if is32 {
                ((a as i32) >> sh32) as i64 as u64
            } else {
                ((a as i64) >> sh64) as u64
            }
        }
        _ => 0,
    }
}
