//! Dynamic instruction-mix statistics.
//!
//! This module tracks what a run executed. It provides:
//! 1. **Instruction mix:** Counts by category (ALU, load, store, jump, conditional branch).
//! 2. **Branch outcomes:** Taken and not-taken conditional branches.
//! 3. **Cache summary:** Instruction-cache hits and misses when the cache was enabled.
//! 4. **Reporting:** A fixed-layout text report through `Display`, and JSON through `serde`.

use std::fmt;

use serde::Serialize;

use crate::core::units::cache::CacheStats;

/// Counters of one emulation run.
///
/// Reset by `Cpu::initialize`; incremented only by the fetch loop and the format executors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisCounters {
    /// Instructions executed.
    pub instructions: u64,
    /// R-type and I-type arithmetic instructions.
    pub alu: u64,
    /// Loads.
    pub loads: u64,
    /// Stores.
    pub stores: u64,
    /// `JAL` and `JALR`.
    pub jumps: u64,
    /// Conditional branches whose condition held.
    pub branches_taken: u64,
    /// Conditional branches whose condition did not hold.
    pub branches_not_taken: u64,
    /// Instruction cache counters, present when fetches went through the cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icache: Option<CacheStats>,
}

/// `numer / denom` as a percentage; 0 when `denom` is 0.
fn pct(numer: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        numer as f64 / denom as f64 * 100.0
    }
}

impl AnalysisCounters {
    /// Total conditional branches.
    pub const fn branches(&self) -> u64 {
        self.branches_taken + self.branches_not_taken
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for AnalysisCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.instructions;
        let branches = self.branches();

        writeln!(f, "=== Analysis")?;
        writeln!(f, "Instructions Executed  = {total}")?;
        writeln!(
            f,
            "R-type + I-type        = {} ({:.2}%)",
            self.alu,
            pct(self.alu, total)
        )?;
        writeln!(
            f,
            "Loads                  = {} ({:.2}%)",
            self.loads,
            pct(self.loads, total)
        )?;
        writeln!(
            f,
            "Stores                 = {} ({:.2}%)",
            self.stores,
            pct(self.stores, total)
        )?;
        writeln!(
            f,
            "Jumps/JAL/JALR         = {} ({:.2}%)",
            self.jumps,
            pct(self.jumps, total)
        )?;
        writeln!(
            f,
            "Conditional branches   = {branches} ({:.2}%)",
            pct(branches, total)
        )?;
        writeln!(
            f,
            "  Branches taken       = {} ({:.2}%)",
            self.branches_taken,
            pct(self.branches_taken, branches)
        )?;
        writeln!(
            f,
            "  Branches not taken   = {} ({:.2}%)",
            self.branches_not_taken,
            pct(self.branches_not_taken, branches)
        )?;

        if let Some(cache) = &self.icache {
            writeln!(f, "=== Instruction Cache")?;
            writeln!(f, "Accesses               = {}", cache.accesses())?;
            writeln!(
                f,
                "  Hits                 = {} ({:.2}%)",
                cache.hits,
                pct(cache.hits, cache.accesses())
            )?;
            writeln!(
                f,
                "  Misses               = {} ({:.2}%)",
                cache.misses,
                pct(cache.misses, cache.accesses())
            )?;
            writeln!(f, "Invalidations          = {}", cache.invalidations)?;
        }
        Ok(())
    }
}
