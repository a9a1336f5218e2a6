//! Program loading.
//!
//! Provides utilities for reading program images and placing them into the
//! guest address space before a run.

/// Raw and ELF program loader.
pub mod loader;

pub use loader::{ElfImage, LoadError, load_binary, load_elf, load_raw, parse_address};
