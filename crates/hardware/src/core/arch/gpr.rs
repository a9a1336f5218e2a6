//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for the RISC-V architecture.
//! It performs the following:
//! 1. **Storage:** Maintains the 31 writable integer registers (`x1`-`x31`).
//! 2. **Invariant Enforcement:** `x0` has no storage at all; reads yield zero and writes are dropped.
//! 3. **Debugging:** Renders the complete register state through `Display`.

use std::fmt;

use crate::common::constants::NUM_GPRS;
use crate::isa::abi::reg_name;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    // regs[i] holds x(i + 1).
    regs: [u64; NUM_GPRS - 1],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_GPRS - 1],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register. Register `x0` always returns 0.
    #[inline]
    pub const fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx - 1] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub const fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx - 1] = val;
        }
    }

    /// Zeroes every register.
    pub const fn reset(&mut self) {
        self.regs = [0; NUM_GPRS - 1];
    }
}

impl fmt::Display for Gpr {
    /// Two registers per line, ABI name and hexadecimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_GPRS).step_by(2) {
            writeln!(
                f,
                "{:>4}={:#018x} {:>4}={:#018x}",
                reg_name(i),
                self.read(i),
                reg_name(i + 1),
                self.read(i + 1)
            )?;
        }
        Ok(())
    }
}
