//! Instruction encoding fields and the decoded instruction model.
//!
//! Provides:
//! 1. **Field extraction:** the `InstructionBits` trait over raw 32-bit words.
//! 2. **Decoded form:** the closed `Instruction` enum. Each variant is one
//!    instruction format and carries only the fields that format defines, so
//!    executors never re-extract bits from the raw word.

use super::bits::extract_bits;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        extract_bits(*self, 0, 7)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        extract_bits(*self, 7, 5) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        extract_bits(*self, 15, 5) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        extract_bits(*self, 20, 5) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        extract_bits(*self, 12, 3)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        extract_bits(*self, 25, 7)
    }
}

/// Register-register operations (`OP_REG` and `OP_REG_32`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegOp {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 * rs2` (low 64 bits)
    Mul,
    /// `rd = rs1 << rs2[5:0]`
    Sll,
    /// `rd = rs1 >> rs2[5:0]` (logical)
    Srl,
    /// `rd = rs1 >> rs2[5:0]` (arithmetic)
    Sra,
    /// `rd = rs1 & rs2`
    And,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// 32-bit add, sign-extended.
    Addw,
    /// 32-bit subtract, sign-extended.
    Subw,
    /// 32-bit shift left, sign-extended.
    Sllw,
    /// 32-bit logical shift right, sign-extended.
    Srlw,
    /// 32-bit arithmetic shift right, sign-extended.
    Sraw,
}

impl RegOp {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::And => "and",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Rem => "rem",
            Self::Remu => "remu",
            Self::Addw => "addw",
            Self::Subw => "subw",
            Self::Sllw => "sllw",
            Self::Srlw => "srlw",
            Self::Sraw => "sraw",
        }
    }
}

/// Register-immediate operations (`OP_IMM`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmOp {
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = imm`; the `addi rd, zero, imm` load-immediate form.
    Li,
    /// `rd = rs1 << shamt`
    Slli,
    /// `rd = rs1 >> shamt` (logical)
    Srli,
    /// `rd = rs1 >> shamt` (arithmetic)
    Srai,
}

impl ImmOp {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Addi => "addi",
            Self::Li => "li",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
        }
    }
}

/// Access width and extension of a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadWidth {
    /// LB: 1 byte, sign-extended.
    Byte,
    /// LH: 2 bytes, sign-extended.
    Half,
    /// LW: 4 bytes, sign-extended.
    Word,
    /// LD: 8 bytes.
    Double,
    /// LBU: 1 byte, zero-extended.
    ByteUnsigned,
    /// LHU: 2 bytes, zero-extended.
    HalfUnsigned,
    /// LWU: 4 bytes, zero-extended.
    WordUnsigned,
}

impl LoadWidth {
    /// Number of bytes read.
    pub const fn size(self) -> u64 {
        match self {
            Self::Byte | Self::ByteUnsigned => 1,
            Self::Half | Self::HalfUnsigned => 2,
            Self::Word | Self::WordUnsigned => 4,
            Self::Double => 8,
        }
    }

    /// Whether the loaded value is sign-extended to 64 bits.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Byte | Self::Half | Self::Word | Self::Double)
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Byte => "lb",
            Self::Half => "lh",
            Self::Word => "lw",
            Self::Double => "ld",
            Self::ByteUnsigned => "lbu",
            Self::HalfUnsigned => "lhu",
            Self::WordUnsigned => "lwu",
        }
    }
}

/// Access width of a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreWidth {
    /// SB
    Byte,
    /// SH
    Half,
    /// SW
    Word,
    /// SD
    Double,
}

impl StoreWidth {
    /// Number of bytes written.
    pub const fn size(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Byte => "sb",
            Self::Half => "sh",
            Self::Word => "sw",
            Self::Double => "sd",
        }
    }
}

/// Relation tested by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// `rs1 == rs2`
    Eq,
    /// `rs1 != rs2`
    Ne,
    /// `rs1 < rs2` (signed)
    Lt,
    /// `rs1 >= rs2` (signed)
    Ge,
    /// `rs1 < rs2` (unsigned)
    Ltu,
    /// `rs1 >= rs2` (unsigned)
    Geu,
}

impl BranchCond {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "beq",
            Self::Ne => "bne",
            Self::Lt => "blt",
            Self::Ge => "bge",
            Self::Ltu => "bltu",
            Self::Geu => "bgeu",
        }
    }
}

/// A decoded instruction.
///
/// Register fields are 5-bit indices (0-31). Immediates and offsets are
/// already reconstructed and sign-extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// R-type: `rd = rs1 op rs2`.
    Reg {
        /// Operation.
        op: RegOp,
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// I-type arithmetic: `rd = rs1 op imm`. For shifts `imm` is the shift amount.
    Imm {
        /// Operation.
        op: ImmOp,
        /// Destination register.
        rd: usize,
        /// Source register.
        rs1: usize,
        /// Sign-extended immediate or shift amount.
        imm: i64,
    },
    /// I-type load: `rd = mem[rs1 + offset]`.
    Load {
        /// Width and extension.
        width: LoadWidth,
        /// Destination register.
        rd: usize,
        /// Base register.
        rs1: usize,
        /// Sign-extended byte offset.
        offset: i64,
    },
    /// I-type indirect jump: `pc = rs1 + offset`.
    Jalr {
        /// Link register field as encoded. The executor never writes it.
        rd: usize,
        /// Base register.
        rs1: usize,
        /// Sign-extended byte offset.
        offset: i64,
    },
    /// S-type store: `mem[rs1 + offset] = rs2`.
    Store {
        /// Width.
        width: StoreWidth,
        /// Base register.
        rs1: usize,
        /// Source register.
        rs2: usize,
        /// Sign-extended byte offset.
        offset: i64,
    },
    /// SB-type conditional branch: `if cond(rs1, rs2) { pc += offset }`.
    Branch {
        /// Relation tested.
        cond: BranchCond,
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Sign-extended, even byte offset.
        offset: i64,
    },
    /// UJ-type jump and link: `rd = pc + 4; pc += offset`.
    Jal {
        /// Link register (x0 discards the link).
        rd: usize,
        /// Sign-extended, even byte offset.
        offset: i64,
    },
}
