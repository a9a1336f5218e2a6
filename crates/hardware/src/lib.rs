//! RISC-V RV64 user-level functional emulator library.
//!
//! This crate runs small compiled RISC-V procedures and profiles what they execute:
//! 1. **Core:** Fetch/decode/dispatch loop, format executors, and the integer register file.
//! 2. **ISA:** Decoding of the supported RV64I/M subset into a closed instruction enum,
//!    immediate reconstruction, and disassembly.
//! 3. **Memory:** A bus routing program RAM and the stack region, plus an optional
//!    set-associative instruction cache.
//! 4. **Host Support:** Configuration, raw and ELF loading, and instruction-mix statistics.
//!
//! # Example
//!
//! ```
//! use rv64emu_core::{Config, Cpu};
//!
//! let config = Config::default();
//! let mut cpu = Cpu::new(&config).unwrap();
//!
//! // addi a0, a0, 1 ; jalr zero, 0(ra)
//! let program: [u32; 2] = [0x0015_0513, 0x0000_8067];
//! let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_le_bytes()).collect();
//! cpu.bus.load_binary_at(&bytes, config.memory.ram_base).unwrap();
//!
//! cpu.initialize(config.memory.ram_base, [41, 0, 0, 0]);
//! assert_eq!(cpu.emulate().unwrap(), 42);
//! assert_eq!(cpu.stats.instructions, 2);
//! ```

/// Common types and constants (sentinel address, access types, errors).
pub mod common;
/// Emulator configuration (defaults, memory map, instruction cache).
pub mod config;
/// CPU core (register file, fetch loop, executors, execution units).
pub mod core;
/// Instruction set (bit fields, decode, instruction model, ABI, disassembly).
pub mod isa;
/// Program loading (raw and ELF images).
pub mod sim;
/// Guest address space (bus, memory regions, device trait).
pub mod soc;
/// Instruction-mix statistics and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, bus, instruction cache, and counters.
pub use crate::core::Cpu;
/// Run failure type.
pub use crate::common::EmuError;
/// Per-run analysis counters.
pub use crate::stats::AnalysisCounters;
