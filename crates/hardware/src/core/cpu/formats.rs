//! Format Executors.
//!
//! One executor per instruction format. Each applies the instruction's effect to
//! the registers and memory, bumps its analysis counter, and advances the
//! program counter. Arithmetic is delegated to the ALU, branch conditions to
//! the BRU.

use super::Cpu;
use crate::common::{AccessType, INSTRUCTION_SIZE, Result};
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru;
use crate::isa::abi::REG_ZERO;
use crate::isa::bits::sign_extend;
use crate::isa::instruction::{BranchCond, ImmOp, Instruction, LoadWidth, RegOp, StoreWidth};

impl Cpu {
    /// Executes a decoded instruction.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::AccessFault` if a load or store touches unmapped memory.
    pub fn execute(&mut self, inst: Instruction) -> Result<()> {
        match inst {
            Instruction::Reg { op, rd, rs1, rs2 } => {
                self.exec_reg(op, rd, rs1, rs2);
                Ok(())
            }
            Instruction::Imm { op, rd, rs1, imm } => {
                self.exec_imm(op, rd, rs1, imm);
                Ok(())
            }
            Instruction::Load {
                width,
                rd,
                rs1,
                offset,
            } => self.exec_load(width, rd, rs1, offset),
            Instruction::Jalr { rs1, offset, .. } => {
                self.exec_jalr(rs1, offset);
                Ok(())
            }
            Instruction::Store {
                width,
                rs1,
                rs2,
                offset,
            } => self.exec_store(width, rs1, rs2, offset),
            Instruction::Branch {
                cond,
                rs1,
                rs2,
                offset,
            } => {
                self.exec_branch(cond, rs1, rs2, offset);
                Ok(())
            }
            Instruction::Jal { rd, offset } => {
                self.exec_jal(rd, offset);
                Ok(())
            }
        }
    }

    const fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
    }

    fn exec_reg(&mut self, op: RegOp, rd: usize, rs1: usize, rs2: usize) {
        let (alu_op, is32) = AluOp::from_reg(op);
        let result = Alu::execute(alu_op, self.regs.read(rs1), self.regs.read(rs2), is32);
        self.regs.write(rd, result);
        self.stats.alu += 1;
        self.advance();
    }

    fn exec_imm(&mut self, op: ImmOp, rd: usize, rs1: usize, imm: i64) {
        let result = Alu::execute(AluOp::from_imm(op), self.regs.read(rs1), imm as u64, false);
        self.regs.write(rd, result);
        self.stats.alu += 1;
        self.advance();
    }

    fn exec_load(&mut self, width: LoadWidth, rd: usize, rs1: usize, offset: i64) -> Result<()> {
        let addr = self.regs.read(rs1).wrapping_add_signed(offset);
        let size = width.size();
        let mut buf = [0; 8];
        self.bus
            .read_bytes(addr, &mut buf[..size as usize], AccessType::Read)?;
        let raw = u64::from_le_bytes(buf);
        let value = if width.is_signed() {
            sign_extend(raw, (size * 8) as u32) as u64
        } else {
            raw
        };
        self.regs.write(rd, value);
        self.stats.loads += 1;
        self.advance();
        Ok(())
    }

    /// Jumps to `rs1 + offset`. The link register is never written.
    fn exec_jalr(&mut self, rs1: usize, offset: i64) {
        self.pc = self.regs.read(rs1).wrapping_add_signed(offset);
        self.stats.jumps += 1;
    }

    fn exec_store(&mut self, width: StoreWidth, rs1: usize, rs2: usize, offset: i64) -> Result<()> {
        let addr = self.regs.read(rs1).wrapping_add_signed(offset);
        let value = self.regs.read(rs2);
        match width {
            StoreWidth::Byte => self.bus.write_u8(addr, value as u8)?,
            StoreWidth::Half => self.bus.write_u16(addr, value as u16)?,
            StoreWidth::Word => self.bus.write_u32(addr, value as u32)?,
            StoreWidth::Double => self.bus.write_u64(addr, value)?,
        }

        if self.icache_enabled {
            self.icache.invalidate(addr, width.size());
        }

        self.stats.stores += 1;
        self.advance();
        Ok(())
    }

    fn exec_branch(&mut self, cond: BranchCond, rs1: usize, rs2: usize, offset: i64) {
        if bru::evaluate(cond, self.regs.read(rs1), self.regs.read(rs2)) {
            self.pc = bru::relative_target(self.pc, offset);
            self.stats.branches_taken += 1;
        } else {
            self.advance();
            self.stats.branches_not_taken += 1;
        }
    }

    fn exec_jal(&mut self, rd: usize, offset: i64) {
        if rd != REG_ZERO {
            self.regs.write(rd, self.pc.wrapping_add(INSTRUCTION_SIZE));
        }
        self.pc = bru::relative_target(self.pc, offset);
        self.stats.jumps += 1;
    }
}
