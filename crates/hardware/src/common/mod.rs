//! Common utilities and types used throughout the emulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Instruction width, sentinel return address, register counts.
//! 2. **Memory Access:** Classification of guest accesses (Fetch/Read/Write).
//! 3. **Error Handling:** Decode and run failures reported to the host.

/// Common constants used throughout the emulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for decode and run failures.
pub mod error;

pub use constants::{INSTRUCTION_SIZE, STOP_ADDRESS};
pub use data::AccessType;
pub use error::{EmuError, Field, Result, Unsupported};
