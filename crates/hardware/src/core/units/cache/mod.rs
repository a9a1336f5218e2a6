//! Set-Associative Instruction Cache.
//!
//! This module implements the instruction-cache collaborator of the fetch loop.
//! It provides:
//! 1. **Interface:** the `InstructionCache` trait the CPU fetches through when the
//!    cache is enabled.
//! 2. **Simulator:** `CacheSim`, a set-associative cache that holds line data filled
//!    from the bus, with pluggable replacement policies and hit/miss counters.
//!
//! The cache is functionally transparent: a lookup returns exactly the word the bus
//! holds. Stores keep it coherent by invalidating the lines they touch.

/// Cache replacement policy implementations (FIFO, LRU, Random).
pub mod policies;

use std::fmt;

use serde::Serialize;
use tracing::trace;

use self::policies::ReplacementPolicy;
use crate::common::{AccessType, EmuError, Result};
use crate::config::CacheConfig;
use crate::soc::Bus;

/// Smallest supported line size: one instruction word.
const MIN_LINE_BYTES: usize = 4;

/// Hit and miss counters of an instruction cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups served from a valid line.
    pub hits: u64,
    /// Lookups that required a line fill (or bypassed the cache).
    pub misses: u64,
    /// Lines dropped by `invalidate`.
    pub invalidations: u64,
}

impl CacheStats {
    /// Total number of line lookups.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, 0.0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Instruction-fetch collaborator of the CPU.
///
/// `lookup` must return exactly what `bus.fetch_u32(addr)` returns.
pub trait InstructionCache {
    /// Resets the cache to empty and clears its counters. Called once per run.
    fn init(&mut self);

    /// Returns the instruction word at `addr`, filling from `bus` on a miss.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::AccessFault` if `addr` is not mapped on `bus`.
    fn lookup(&mut self, bus: &Bus, addr: u64) -> Result<u32>;

    /// Drops every line holding a byte of `[addr, addr + len)`.
    fn invalidate(&mut self, addr: u64, len: u64);

    /// Returns the hit and miss counters.
    fn stats(&self) -> CacheStats;
}

/// Cache line entry: tag and validity. Line bytes live in `CacheSim::data`.
#[derive(Clone, Copy, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
}

/// Set-associative instruction cache simulator.
pub struct CacheSim {
    lines: Vec<CacheLine>,
    /// Line contents, `line_bytes` per entry of `lines`.
    data: Vec<u8>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified geometry.
    ///
    /// # Arguments
    ///
    /// * `config` - Size, line size, associativity, and replacement policy.
    ///   `config.enabled` is ignored here; the CPU decides whether to consult the cache.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::InvalidConfig` if the line size is not a power of two of at
    /// least 4 bytes, the total size is not a power-of-two multiple of the line size,
    /// or the associativity does not divide the number of lines.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let CacheConfig {
            size_bytes,
            line_bytes,
            ways,
            policy,
            ..
        } = *config;

        if line_bytes < MIN_LINE_BYTES || !line_bytes.is_power_of_two() {
            return Err(EmuError::InvalidConfig(format!(
                "cache line size {line_bytes} must be a power of two of at least {MIN_LINE_BYTES}"
            )));
        }
        if size_bytes < line_bytes || !size_bytes.is_power_of_two() {
            return Err(EmuError::InvalidConfig(format!(
                "cache size {size_bytes} must be a power of two no smaller than the line size {line_bytes}"
            )));
        }
        let num_lines = size_bytes / line_bytes;
        if ways == 0 || num_lines % ways != 0 {
            return Err(EmuError::InvalidConfig(format!(
                "cache associativity {ways} must divide the line count {num_lines}"
            )));
        }
        let num_sets = num_lines / ways;

        Ok(Self {
            lines: vec![CacheLine::default(); num_lines],
            data: vec![0; size_bytes],
            num_sets,
            ways,
            line_bytes,
            policy: policies::build(policy, num_sets, ways),
            stats: CacheStats::default(),
        })
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Checks if a valid line holds the byte at `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        self.find_way(addr).is_some()
    }

    fn set_index(&self, addr: u64) -> usize {
        ((addr / self.line_bytes as u64) % self.num_sets as u64) as usize
    }

    fn tag(&self, addr: u64) -> u64 {
        addr / (self.line_bytes * self.num_sets) as u64
    }

    fn line_base(&self, addr: u64) -> u64 {
        addr & !(self.line_bytes as u64 - 1)
    }

    fn find_way(&self, addr: u64) -> Option<usize> {
        let base_idx = self.set_index(addr) * self.ways;
        let tag = self.tag(addr);
        (0..self.ways).find(|&way| {
            let line = self.lines[base_idx + way];
            line.valid && line.tag == tag
        })
    }

    /// Returns the index into `lines` of the line holding `addr`, filling it on a miss.
    ///
    /// `Ok(None)` means the line could not be filled (it extends past the end of a
    /// mapped region) and the caller must read the bus directly.
    fn line_for(&mut self, bus: &Bus, addr: u64) -> Result<Option<usize>> {
        let set = self.set_index(addr);
        let base_idx = set * self.ways;

        if let Some(way) = self.find_way(addr) {
            self.stats.hits += 1;
            self.policy.update(set, way);
            return Ok(Some(base_idx + way));
        }

        self.stats.misses += 1;
        let line_base = self.line_base(addr);
        if !bus.contains_range(line_base, self.line_bytes as u64) {
            return Ok(None);
        }

        let way = (0..self.ways)
            .find(|&w| !self.lines[base_idx + w].valid)
            .unwrap_or_else(|| self.policy.get_victim(set));
        let idx = base_idx + way;
        let start = idx * self.line_bytes;
        bus.read_bytes(
            line_base,
            &mut self.data[start..start + self.line_bytes],
            AccessType::Fetch,
        )?;
        self.lines[idx] = CacheLine {
            tag: self.tag(addr),
            valid: true,
        };
        self.policy.fill(set, way);
        trace!(line = format_args!("{line_base:#x}"), set, way, "icache fill");
        Ok(Some(idx))
    }

    fn read_byte(&mut self, bus: &Bus, addr: u64) -> Result<u8> {
        match self.line_for(bus, addr)? {
            Some(idx) => {
                let offset = (addr - self.line_base(addr)) as usize;
                Ok(self.data[idx * self.line_bytes + offset])
            }
            None => {
                let mut byte = [0];
                bus.read_bytes(addr, &mut byte, AccessType::Fetch)?;
                Ok(byte[0])
            }
        }
    }
}

impl fmt::Debug for CacheSim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSim")
            .field("num_sets", &self.num_sets)
            .field("ways", &self.ways)
            .field("line_bytes", &self.line_bytes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl InstructionCache for CacheSim {
    fn init(&mut self) {
        self.lines.fill(CacheLine::default());
        self.policy.reset();
        self.stats = CacheStats::default();
    }

    fn lookup(&mut self, bus: &Bus, addr: u64) -> Result<u32> {
        // Surface faults exactly as an uncached fetch would.
        if !bus.contains_range(addr, 4) {
            return bus.fetch_u32(addr);
        }

        let offset = (addr - self.line_base(addr)) as usize;
        if offset + 4 > self.line_bytes {
            // Misaligned word spanning two lines.
            let mut bytes = [0; 4];
            for (i, byte) in bytes.iter_mut().enumerate() {
                *byte = self.read_byte(bus, addr + i as u64)?;
            }
            return Ok(u32::from_le_bytes(bytes));
        }

        match self.line_for(bus, addr)? {
            Some(idx) => {
                let start = idx * self.line_bytes + offset;
                let mut word = [0; 4];
                word.copy_from_slice(&self.data[start..start + 4]);
                Ok(u32::from_le_bytes(word))
            }
            None => bus.fetch_u32(addr),
        }
    }

    fn invalidate(&mut self, addr: u64, len: u64) {
        if len == 0 {
            return;
        }
        let step = self.line_bytes as u64;
        let last = self.line_base(addr.saturating_add(len - 1));
        let mut line = self.line_base(addr);
        loop {
            if let Some(way) = self.find_way(line) {
                let idx = self.set_index(line) * self.ways + way;
                self.lines[idx].valid = false;
                self.stats.invalidations += 1;
            }
            if line >= last {
                break;
            }
            line += step;
        }
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }
}
