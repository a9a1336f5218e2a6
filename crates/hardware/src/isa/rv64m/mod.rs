//! RISC-V Multiply/Divide Extension (M).
//!
//! The emulator supports the subset used by compiled integer code: MUL and
//! the four divide/remainder forms. They share the `OP_REG` opcode with base
//! integer arithmetic and are distinguished by `funct7 == M_EXTENSION`.

/// Function code 3 definitions for multiply/divide operations.
pub mod funct3;

/// Multiply/divide extension opcodes.
pub mod opcodes;
