//! Main Execution Loop.
//!
//! This module implements the fetch/decode/dispatch cycle of the CPU. It performs the following:
//! 1. **Fetch:** Reads the word at `pc`, through the instruction cache when enabled.
//! 2. **Decode:** Turns it into an `Instruction`; an unsupported encoding stops the run here,
//!    before any counter or register changes.
//! 3. **Dispatch:** Counts the instruction and hands it to exactly one format executor.
//! 4. **Run Control:** Repeats until the sentinel return address, or the instruction budget runs out.

use tracing::{debug, trace, warn};

use super::Cpu;
use crate::common::{EmuError, Result};
use crate::isa::decode::decode;
use crate::isa::disasm::format_instruction;

impl Cpu {
    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::UnsupportedInstruction` for an encoding outside the
    /// supported subset, or `EmuError::AccessFault` for an unmapped fetch, load,
    /// or store.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.pc;
        let raw = self.fetch(pc)?;
        let inst = decode(raw).map_err(|err| {
            warn!(pc = format_args!("{pc:#x}"), raw = format_args!("{raw:#010x}"), %err, "decode failed");
            EmuError::unsupported(err, raw, pc)
        })?;

        self.stats.instructions += 1;
        if self.trace {
            trace!(
                pc = format_args!("{pc:#x}"),
                raw = format_args!("{raw:#010x}"),
                "{}",
                format_instruction(&inst)
            );
        }

        self.execute(inst)
    }

    /// Runs until the program counter reaches the sentinel return address.
    ///
    /// # Returns
    ///
    /// The value of `a0` when the procedure returns.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Cpu::step`], or returns
    /// `EmuError::InstructionLimit` when the configured budget is exhausted first.
    pub fn emulate(&mut self) -> Result<u64> {
        while !self.is_stopped() {
            if let Some(limit) = self.max_instructions {
                if self.stats.instructions >= limit {
                    warn!(limit, pc = format_args!("{:#x}", self.pc), "instruction limit reached");
                    return Err(EmuError::InstructionLimit(limit));
                }
            }
            self.step()?;
        }

        let ret = self.return_value();
        debug!(
            instructions = self.stats.instructions,
            a0 = format_args!("{ret:#x}"),
            "run complete"
        );
        Ok(ret)
    }

    fn fetch(&mut self, pc: u64) -> Result<u32> {
        if self.icache_enabled {
            self.icache.lookup(&self.bus, pc)
        } else {
            self.bus.fetch_u32(pc)
        }
    }
}
