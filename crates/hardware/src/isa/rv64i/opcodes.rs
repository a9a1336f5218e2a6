//! RISC-V Base Integer (I) Opcodes.
//!
//! Major opcodes (bits 6-0) of the formats the emulator executes.

/// Load instructions (LB, LH, LW, LD, LBU, LHU, LWU).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, SLLI, SRLI, SRAI).
pub const OP_IMM: u32 = 0b0010011;

/// Store instructions (SB, SH, SW, SD).
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, SLL, ...), shared with the M extension.
pub const OP_REG: u32 = 0b0110011;

/// 32-bit Register-Register arithmetic (ADDW, SUBW, SLLW, SRLW, SRAW) - RV64 only.
pub const OP_REG_32: u32 = 0b0111011;

/// Conditional Branch instructions (BEQ, BNE, etc.).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump Register (JALR).
pub const OP_JALR: u32 = 0b1100111;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;
