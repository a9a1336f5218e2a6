//! Memory Access Types.
//!
//! Classifies guest memory accesses so faults can report what the emulator
//! was doing when an address fell outside every mapped region.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch, from the fetch loop or the instruction cache fill path.
    Fetch,
    /// Data read performed by a load instruction.
    Read,
    /// Data write performed by a store instruction or the program loader.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}
