//! Instruction Disassembler for the RV64 subset.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for debug tracing, the `disasm` command, and test diagnostics.
//! Anything the decoder rejects prints as `"unknown"`.
//!
//! # Usage
//!
//! ```
//! use rv64emu_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A0_0513); // addi x10, x0, 10
//! assert_eq!(text, "li a0, 10");
//! ```

use super::abi::reg_name;
use super::decode::decode;
use super::instruction::{ImmOp, Instruction};

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown"` for
/// encodings outside the supported subset.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    decode(inst).map_or_else(|_| "unknown".to_string(), |decoded| format_instruction(&decoded))
}

/// Formats an already-decoded instruction.
///
/// Branch and jump offsets are printed relative to the instruction address.
pub fn format_instruction(inst: &Instruction) -> String {
    match *inst {
        Instruction::Reg { op, rd, rs1, rs2 } => format!(
            "{} {}, {}, {}",
            op.mnemonic(),
            reg_name(rd),
            reg_name(rs1),
            reg_name(rs2)
        ),
        Instruction::Imm {
            op: ImmOp::Li,
            rd,
            imm,
            ..
        } => format!("li {}, {imm}", reg_name(rd)),
        Instruction::Imm { op, rd, rs1, imm } => {
            format!("{} {}, {}, {imm}", op.mnemonic(), reg_name(rd), reg_name(rs1))
        }
        Instruction::Load {
            width,
            rd,
            rs1,
            offset,
        } => format!(
            "{} {}, {offset}({})",
            width.mnemonic(),
            reg_name(rd),
            reg_name(rs1)
        ),
        Instruction::Jalr { rd, rs1, offset } => {
            format!("jalr {}, {offset}({})", reg_name(rd), reg_name(rs1))
        }
        Instruction::Store {
            width,
            rs1,
            rs2,
            offset,
        } => format!(
            "{} {}, {offset}({})",
            width.mnemonic(),
            reg_name(rs2),
            reg_name(rs1)
        ),
        Instruction::Branch {
            cond,
            rs1,
            rs2,
            offset,
        } => format!(
            "{} {}, {}, {offset}",
            cond.mnemonic(),
            reg_name(rs1),
            reg_name(rs2)
        ),
        Instruction::Jal { rd, offset } => format!("jal {}, {offset}", reg_name(rd)),
    }
}
