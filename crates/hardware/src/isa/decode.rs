//! RISC-V Instruction Decoder.
//!
//! This module turns a raw 32-bit instruction word into a format-tagged
//! [`Instruction`]. It provides:
//! 1. **Immediate decoders:** one per format, reassembling the immediate bits
//!    that the encoding scatters to keep the register fields at fixed positions.
//! 2. **Sub-opcode decoding:** `funct3`/`funct7` are resolved to a closed
//!    operation enum at decode time, so an unsupported combination is rejected
//!    before the instruction touches any state.

use super::bits::{extract_bits, sign_extend};
use super::instruction::{
    BranchCond, ImmOp, Instruction, InstructionBits, LoadWidth, RegOp, StoreWidth,
};
use super::rv64i::{funct3, funct7, opcodes};
use super::rv64m::{funct3 as m_funct3, opcodes::M_EXTENSION};
use crate::common::error::{Field, Unsupported};

/// Width of the I-Type immediate (bits 20-31).
const I_IMM_BITS: u32 = 12;

/// Width of the S-Type immediate (`imm[11:5] | imm[4:0]`).
const S_IMM_BITS: u32 = 12;

/// Width of the B-Type immediate, including the implicit zero bit 0.
const B_IMM_BITS: u32 = 13;

/// Width of the J-Type immediate, including the implicit zero bit 0.
const J_IMM_BITS: u32 = 21;

/// Width of the RV64 shift amount field of shift-immediate instructions.
const SHAMT_BITS: u32 = 6;

/// Decodes the immediate value for I-Type instructions.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// Used for Load, JALR, and Immediate Arithmetic instructions.
pub const fn decode_i_imm(inst: u32) -> i64 {
    sign_extend(extract_bits(inst, 20, 12) as u64, I_IMM_BITS)
}

/// Decodes the immediate value for S-Type instructions.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
pub const fn decode_s_imm(inst: u32) -> i64 {
    let low = extract_bits(inst, 7, 5);
    let high = extract_bits(inst, 25, 7);
    sign_extend(((high << 5) | low) as u64, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type (SB) instructions.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
///
/// Bit 0 of the offset is implicitly zero, so the result is always even.
pub const fn decode_b_imm(inst: u32) -> i64 {
    let bit_12 = extract_bits(inst, 31, 1);
    let bit_11 = extract_bits(inst, 7, 1);
    let bits_10_5 = extract_bits(inst, 25, 6);
    let bits_4_1 = extract_bits(inst, 8, 4);

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined as u64, B_IMM_BITS)
}

/// Decodes the immediate value for J-Type (UJ) instructions.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
///
/// Bit 0 of the offset is implicitly zero, so the result is always even.
pub const fn decode_j_imm(inst: u32) -> i64 {
    let bit_20 = extract_bits(inst, 31, 1);
    let bits_19_12 = extract_bits(inst, 12, 8);
    let bit_11 = extract_bits(inst, 20, 1);
    let bits_10_1 = extract_bits(inst, 21, 10);

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined as u64, J_IMM_BITS)
}

/// Decodes a RISC-V instruction word.
///
/// # Errors
///
/// Returns [`Unsupported`] naming the offending field when the opcode, or a
/// `funct3`/`funct7`/shift-immediate combination within a supported opcode,
/// lies outside the emulated subset.
///
/// # Examples
///
/// ```
/// use rv64emu_core::isa::decode::decode;
/// use rv64emu_core::isa::instruction::{ImmOp, Instruction};
///
/// // addi x2, x1, 10
/// let inst = decode(0x00A0_8113).unwrap();
/// assert_eq!(
///     inst,
///     Instruction::Imm { op: ImmOp::Addi, rd: 2, rs1: 1, imm: 10 }
/// );
/// ```
pub fn decode(inst: u32) -> Result<Instruction, Unsupported> {
    match inst.opcode() {
        opcodes::OP_REG | opcodes::OP_REG_32 => decode_reg(inst),
        opcodes::OP_IMM => decode_imm(inst),
        opcodes::OP_LOAD => decode_load(inst),
        opcodes::OP_JALR => decode_jalr(inst),
        opcodes::OP_STORE => decode_store(inst),
        opcodes::OP_BRANCH => decode_branch(inst),
        opcodes::OP_JAL => Ok(Instruction::Jal {
            rd: inst.rd(),
            offset: decode_j_imm(inst),
        }),
        other => Err(Unsupported::new(Field::Opcode, other)),
    }
}

fn decode_reg(inst: u32) -> Result<Instruction, Unsupported> {
    let f3 = inst.funct3();
    let f7 = inst.funct7();

    let op = match (inst.opcode(), f7, f3) {
        (opcodes::OP_REG, funct7::DEFAULT, funct3::ADD_SUB) => RegOp::Add,
        (opcodes::OP_REG, funct7::DEFAULT, funct3::SLL) => RegOp::Sll,
        (opcodes::OP_REG, funct7::DEFAULT, funct3::SRL_SRA) => RegOp::Srl,
        (opcodes::OP_REG, funct7::DEFAULT, funct3::AND) => RegOp::And,
        (opcodes::OP_REG, funct7::SUB, funct3::ADD_SUB) => RegOp::Sub,
        (opcodes::OP_REG, funct7::SRA, funct3::SRL_SRA) => RegOp::Sra,
        (opcodes::OP_REG, M_EXTENSION, m_funct3::MUL) => RegOp::Mul,
        (opcodes::OP_REG, M_EXTENSION, m_funct3::DIV) => RegOp::Div,
        (opcodes::OP_REG, M_EXTENSION, m_funct3::DIVU) => RegOp::Divu,
        (opcodes::OP_REG, M_EXTENSION, m_funct3::REM) => RegOp::Rem,
        (opcodes::OP_REG, M_EXTENSION, m_funct3::REMU) => RegOp::Remu,
        (opcodes::OP_REG_32, funct7::DEFAULT, funct3::ADD_SUB) => RegOp::Addw,
        (opcodes::OP_REG_32, funct7::SUB, funct3::ADD_SUB) => RegOp::Subw,
        (opcodes::OP_REG_32, funct7::DEFAULT, funct3::SLL) => RegOp::Sllw,
        (opcodes::OP_REG_32, funct7::DEFAULT, funct3::SRL_SRA) => RegOp::Srlw,
        (opcodes::OP_REG_32, funct7::SRA, funct3::SRL_SRA) => RegOp::Sraw,
        // No word-width multiply/divide in the subset.
        (opcodes::OP_REG_32, M_EXTENSION, _) => {
            return Err(Unsupported::new(Field::RegFunct7, f7));
        }
        (_, funct7::DEFAULT | funct7::SUB | M_EXTENSION, _) => {
            return Err(Unsupported::new(Field::RegFunct3, f3));
        }
        _ => return Err(Unsupported::new(Field::RegFunct7, f7)),
    };

    Ok(Instruction::Reg {
        op,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
    })
}

fn decode_imm(inst: u32) -> Result<Instruction, Unsupported> {
    let rd = inst.rd();
    let rs1 = inst.rs1();
    // imm[11:6]: must be clear for SLLI/SRLI, 0b010000 for SRAI.
    let shift_high = extract_bits(inst, 26, 6);
    let shamt = i64::from(extract_bits(inst, 20, SHAMT_BITS));

    let (op, imm) = match inst.funct3() {
        funct3::ADD_SUB if rs1 == 0 => (ImmOp::Li, decode_i_imm(inst)),
        funct3::ADD_SUB => (ImmOp::Addi, decode_i_imm(inst)),
        funct3::SLL => {
            if shift_high != 0 {
                return Err(Unsupported::new(Field::ImmShift, shift_high));
            }
            (ImmOp::Slli, shamt)
        }
        funct3::SRL_SRA => match shift_high {
            0 => (ImmOp::Srli, shamt),
            funct7::SRAI_HIGH => (ImmOp::Srai, shamt),
            other => return Err(Unsupported::new(Field::ImmShift, other)),
        },
        other => return Err(Unsupported::new(Field::ImmFunct3, other)),
    };

    Ok(Instruction::Imm { op, rd, rs1, imm })
}

fn decode_load(inst: u32) -> Result<Instruction, Unsupported> {
    let width = match inst.funct3() {
        funct3::LB => LoadWidth::Byte,
        funct3::LH => LoadWidth::Half,
        funct3::LW => LoadWidth::Word,
        funct3::LD => LoadWidth::Double,
        funct3::LBU => LoadWidth::ByteUnsigned,
        funct3::LHU => LoadWidth::HalfUnsigned,
        funct3::LWU => LoadWidth::WordUnsigned,
        other => return Err(Unsupported::new(Field::LoadFunct3, other)),
    };

    Ok(Instruction::Load {
        width,
        rd: inst.rd(),
        rs1: inst.rs1(),
        offset: decode_i_imm(inst),
    })
}

fn decode_jalr(inst: u32) -> Result<Instruction, Unsupported> {
    match inst.funct3() {
        funct3::JALR => Ok(Instruction::Jalr {
            rd: inst.rd(),
            rs1: inst.rs1(),
            offset: decode_i_imm(inst),
        }),
        other => Err(Unsupported::new(Field::JalrFunct3, other)),
    }
}

fn decode_store(inst: u32) -> Result<Instruction, Unsupported> {
    let width = match inst.funct3() {
        funct3::SB => StoreWidth::Byte,
        funct3::SH => StoreWidth::Half,
        funct3::SW => StoreWidth::Word,
        funct3::SD => StoreWidth::Double,
        other => return Err(Unsupported::new(Field::StoreFunct3, other)),
    };

    Ok(Instruction::Store {
        width,
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        offset: decode_s_imm(inst),
    })
}

fn decode_branch(inst: u32) -> Result<Instruction, Unsupported> {
    let cond = match inst.funct3() {
        funct3::BEQ => BranchCond::Eq,
        funct3::BNE => BranchCond::Ne,
        funct3::BLT => BranchCond::Lt,
        funct3::BGE => BranchCond::Ge,
        funct3::BLTU => BranchCond::Ltu,
        funct3::BGEU => BranchCond::Geu,
        other => return Err(Unsupported::new(Field::BranchFunct3, other)),
    };

    Ok(Instruction::Branch {
        cond,
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        offset: decode_b_imm(inst),
    })
}
