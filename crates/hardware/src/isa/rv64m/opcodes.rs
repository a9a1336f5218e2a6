//! RISC-V Multiply/Divide Extension (M) selector.
//!
//! The M extension has no major opcode of its own; it lives under `OP_REG`
//! with `funct7` bit 0 set.

/// `funct7` value selecting the multiply/divide group under `OP_REG`.
pub const M_EXTENSION: u32 = 0b0000001;
