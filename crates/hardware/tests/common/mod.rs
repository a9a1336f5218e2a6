//! Shared test infrastructure.

/// Instruction encoders.
pub mod builder;

/// `TestContext`: a CPU with a program loaded at the RAM base.
pub mod harness;
