//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic for the
//! emulated RV64 subset, organized by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (64-bit), the arithmetic, memory and
//!   control-flow subset.
//! * `rv64m`: Multiplication and Division (`MUL`, `DIV[U]`, `REM[U]`).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Bit-field extraction and sign extension.
pub mod bits;

/// Instruction decoding logic for the supported instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding fields and the decoded instruction model.
pub mod instruction;

/// Base integer instruction set (64-bit RISC-V core instructions).
pub mod rv64i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv64m;
