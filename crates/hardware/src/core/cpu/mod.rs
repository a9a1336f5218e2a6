//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the single mutable execution context
//! of one emulator instance. It coordinates the following:
//! 1. **State Management:** Maintains the integer registers and the program counter.
//! 2. **Memory:** Owns the guest bus (program RAM and the stack region).
//! 3. **Instruction Cache:** Owns the cache collaborator fetches may go through.
//! 4. **Analysis:** Owns the instruction-mix counters of the current run.
//!
//! Lifecycle: construct, load a program onto `bus`, `initialize`, then `emulate`.

/// Fetch/decode/dispatch loop.
pub mod execution;

/// Per-format instruction executors.
pub mod formats;

use std::fmt;

use tracing::debug;

use crate::common::constants::NUM_ARGS;
use crate::common::{Result, STOP_ADDRESS};
use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::units::cache::{CacheSim, CacheStats, InstructionCache};
use crate::isa::abi::{ARG_REGS, REG_A0, REG_RA, REG_SP};
use crate::soc::{Bus, build_bus};
use crate::stats::AnalysisCounters;

/// Main CPU structure containing all architectural state and its collaborators.
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Program Counter.
    pub pc: u64,
    /// Guest address space.
    pub bus: Bus,
    /// Fetch through `icache` instead of reading the bus directly.
    pub icache_enabled: bool,
    /// Instruction-mix counters of the current run.
    pub stats: AnalysisCounters,
    /// Emit a `trace` event per executed instruction.
    pub trace: bool,
    icache: Box<dyn InstructionCache + Send>,
    max_instructions: Option<u64>,
    stack_top: u64,
}

impl Cpu {
    /// Creates a CPU with the memory map and instruction cache described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::InvalidConfig` if the memory map is rejected (see
    /// [`build_bus`]) or the cache geometry is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let icache = CacheSim::new(&config.icache)?;
        Self::with_icache(config, Box::new(icache))
    }

    /// Creates a CPU that fetches through the supplied cache implementation.
    ///
    /// `config.icache.enabled` still decides whether the cache is consulted; its
    /// geometry fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::InvalidConfig` if the memory map is rejected.
    pub fn with_icache(
        config: &Config,
        icache: Box<dyn InstructionCache + Send>,
    ) -> Result<Self> {
        let bus = build_bus(&config.memory)?;
        Ok(Self {
            regs: Gpr::new(),
            pc: STOP_ADDRESS,
            bus,
            icache_enabled: config.icache.enabled,
            stats: AnalysisCounters::default(),
            trace: config.general.trace_instructions,
            icache,
            max_instructions: config.general.max_instructions,
            stack_top: config.memory.stack_top(),
        })
    }

    /// Prepares a run of the procedure at `entry`.
    ///
    /// Zeroes every register, then seeds `a0`-`a3` with `args`, `ra` with the
    /// sentinel return address, and `sp` with the top of the stack region. Resets
    /// the analysis counters and initializes the instruction cache.
    ///
    /// # Arguments
    ///
    /// * `entry` - Address of the first instruction.
    /// * `args` - Values for `a0`, `a1`, `a2`, `a3`.
    pub fn initialize(&mut self, entry: u64, args: [u64; NUM_ARGS]) {
        self.regs.reset();
        for (reg, val) in ARG_REGS.into_iter().zip(args) {
            self.regs.write(reg, val);
        }
        self.regs.write(REG_RA, STOP_ADDRESS);
        self.regs.write(REG_SP, self.stack_top);
        self.pc = entry;
        self.stats = AnalysisCounters::default();
        self.icache.init();

        debug!(
            entry = format_args!("{entry:#x}"),
            sp = format_args!("{:#x}", self.stack_top),
            ?args,
            "cpu initialized"
        );
    }

    /// Returns `true` once the program counter reaches the sentinel return address.
    pub const fn is_stopped(&self) -> bool {
        self.pc == STOP_ADDRESS
    }

    /// Returns the value of `a0`, the procedure's return value after a run.
    pub const fn return_value(&self) -> u64 {
        self.regs.read(REG_A0)
    }

    /// Returns the instruction cache counters.
    pub fn icache_stats(&self) -> CacheStats {
        self.icache.stats()
    }

    /// Returns the analysis counters, with the cache summary attached when the
    /// cache is enabled.
    pub fn analysis(&self) -> AnalysisCounters {
        AnalysisCounters {
            icache: self.icache_enabled.then(|| self.icache.stats()),
            ..self.stats.clone()
        }
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &format_args!("{:#x}", self.pc))
            .field("bus", &self.bus)
            .field("icache_enabled", &self.icache_enabled)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
