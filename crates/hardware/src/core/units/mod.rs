//! Execution units and functional components.
//!
//! This module contains the units the format executors delegate to: the
//! integer ALU, the branch resolution unit, and the instruction cache.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (condition evaluation and target computation).
pub mod bru;

/// Set-associative instruction cache with replacement policies.
pub mod cache;
