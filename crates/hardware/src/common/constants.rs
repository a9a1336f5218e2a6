//! Global Emulator Constants.
//!
//! This module defines constants shared by the fetch loop, the executors and the loader:
//! 1. **Instruction Constants:** Instruction width.
//! 2. **Run Control:** The sentinel return address that terminates a run.
//! 3. **Register File:** Architectural register count.

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Reserved program-counter value meaning "no caller to return to".
///
/// Installed in `ra` by `Cpu::initialize`, so the top-level `ret` of the
/// emulated procedure lands here and stops the fetch loop. Address 0 is never
/// mapped by the emulator's memory map.
pub const STOP_ADDRESS: u64 = 0;

/// Number of general-purpose registers.
pub const NUM_GPRS: usize = 32;

/// Number of argument registers seeded by `Cpu::initialize` (`a0`-`a3`).
pub const NUM_ARGS: usize = 4;
