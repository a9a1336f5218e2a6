//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the R-type and I-type
//! executors. It handles arithmetic, logical operations, and shifts for both
//! 32-bit and 64-bit operands, plus the multiply/divide subset.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Divu, Rem, Remu
//! - [`logic`]:      And
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations.
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::isa::instruction::{ImmOp, RegOp};

/// Operation selector for the integer ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Low 64 bits of the product.
    Mul,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// Bitwise AND.
    And,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
}

impl AluOp {
    /// Maps a register-register operation to its ALU operation and word flag.
    pub const fn from_reg(op: RegOp) -> (Self, bool) {
        match op {
            RegOp::Add => (Self::Add, false),
            RegOp::Sub => (Self::Sub, false),
            RegOp::Mul => (Self::Mul, false),
            RegOp::Sll => (Self::Sll, false),
            RegOp::Srl => (Self::Srl, false),
            RegOp::Sra => (Self::Sra, false),
            RegOp::And => (Self::And, false),
            RegOp::Div => (Self::Div, false),
            RegOp::Divu => (Self::Divu, false),
            RegOp::Rem => (Self::Rem, false),
            RegOp::Remu => (Self::Remu, false),
            RegOp::Addw => (Self::Add, true),
            RegOp::Subw => (Self::Sub, true),
            RegOp::Sllw => (Self::Sll, true),
            RegOp::Srlw => (Self::Srl, true),
            RegOp::Sraw => (Self::Sra, true),
        }
    }

    /// Maps a register-immediate operation to its ALU operation.
    ///
    /// `Li` is an add whose first operand is `x0`.
    pub const fn from_imm(op: ImmOp) -> Self {
        match op {
            ImmOp::Addi | ImmOp::Li => Self::Add,
            ImmOp::Slli => Self::Sll,
            ImmOp::Srli => Self::Srl,
            ImmOp::Srai => Self::Sra,
        }
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op`   - The ALU operation to perform
    /// * `a`    - First operand (64-bit value)
    /// * `b`    - Second operand (64-bit value, also used as shift amount)
    /// * `is32` - If true, perform the 32-bit (W-suffix) variant
    ///
    /// # Returns
    ///
    /// The 64-bit result of the ALU operation. For 32-bit operations,
    /// the result is sign-extended to 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use rv64emu_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false), 50);
    ///
    /// // 32-bit addition wraps and sign-extends
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    ///
    /// // Division by zero yields all ones
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 0, false), u64::MAX);
    /// ```
    pub const fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute(op, a, b, is32),

            AluOp::And => logic::execute(op, a, b),

            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b, is32),
        }
    }
}
