//! Core processor implementation.
//!
//! This module contains the CPU, its architectural state, and the execution
//! units the format executors delegate to.

/// Architectural state (integer register file).
pub mod arch;

/// CPU core, fetch loop, and format executors.
pub mod cpu;

/// Execution units (ALU, BRU, instruction cache).
pub mod units;

pub use self::cpu::Cpu;
