//! RISC-V architecture-specific components.
//!
//! The emulator models user-level integer state only, so the architectural
//! state beyond the program counter is the integer register file.

/// General-Purpose Register file implementation.
pub mod gpr;
