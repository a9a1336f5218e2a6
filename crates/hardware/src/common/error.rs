//! Emulator error definitions.
//!
//! This module defines the failures a run can surface to its host. It provides:
//! 1. **Decode failures:** `Unsupported`, naming the instruction field that fell outside
//!    the supported subset and its numeric value.
//! 2. **Run failures:** `EmuError`, which wraps decode failures with the faulting
//!    program counter and adds bus access faults and run-budget exhaustion.
//!
//! None of these are recoverable inside the emulator: the fetch loop stops at the
//! first error and hands it to the caller instead of terminating the process.

use std::fmt;

use thiserror::Error;

use super::data::AccessType;

/// Instruction field that can hold an unsupported value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Major opcode (bits 0-6).
    Opcode,
    /// `funct3` of a register-register instruction.
    RegFunct3,
    /// `funct7` of a register-register instruction.
    RegFunct7,
    /// `funct3` of a register-immediate instruction.
    ImmFunct3,
    /// Reserved upper immediate bits of a shift-immediate instruction.
    ImmShift,
    /// `funct3` of a load.
    LoadFunct3,
    /// `funct3` of a store.
    StoreFunct3,
    /// `funct3` of a conditional branch.
    BranchFunct3,
    /// `funct3` of `JALR` (must be zero).
    JalrFunct3,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Opcode => "opcode",
            Self::RegFunct3 => "R-type funct3",
            Self::RegFunct7 => "R-type funct7",
            Self::ImmFunct3 => "I-type funct3",
            Self::ImmShift => "I-type shift immediate",
            Self::LoadFunct3 => "load funct3",
            Self::StoreFunct3 => "store funct3",
            Self::BranchFunct3 => "B-type funct3",
            Self::JalrFunct3 => "JALR funct3",
        };
        f.write_str(name)
    }
}

/// An instruction word that the decoder does not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unsupported {field} {value:#x}")]
pub struct Unsupported {
    /// Which field was rejected.
    pub field: Field,
    /// The rejected field value.
    pub value: u32,
}

impl Unsupported {
    /// Creates a decode failure for `field` holding `value`.
    pub const fn new(field: Field, value: u32) -> Self {
        Self { field, value }
    }
}

/// Failure of an emulation run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmuError {
    /// The word at `pc` uses an encoding outside the supported subset.
    #[error("unsupported {field} {value:#x} in instruction {raw:#010x} at pc {pc:#x}")]
    UnsupportedInstruction {
        /// Which field was rejected.
        field: Field,
        /// The rejected field value.
        value: u32,
        /// Raw instruction word.
        raw: u32,
        /// Address of the instruction.
        pc: u64,
    },

    /// An access touched bytes outside every mapped region.
    #[error("{access} access fault: {size} byte(s) at {addr:#x}")]
    AccessFault {
        /// First guest address of the access.
        addr: u64,
        /// Width of the access in bytes.
        size: u64,
        /// What the emulator was doing.
        access: AccessType,
    },

    /// The configured instruction budget ran out before the sentinel return address was reached.
    #[error("instruction limit of {0} reached before the program returned")]
    InstructionLimit(u64),

    /// The configuration describes an impossible machine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EmuError {
    /// Attaches the raw word and its address to a decode failure.
    pub const fn unsupported(err: Unsupported, raw: u32, pc: u64) -> Self {
        Self::UnsupportedInstruction {
            field: err.field,
            value: err.value,
            raw,
            pc,
        }
    }

    /// Returns `true` for the unsupported-encoding category.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedInstruction { .. })
    }
}

/// Result type used throughout the emulator core.
pub type Result<T> = std::result::Result<T, EmuError>;
