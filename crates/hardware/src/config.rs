//! Configuration system for the emulator.
//!
//! This module defines the configuration structures used to parameterize an
//! emulator instance. It provides:
//! 1. **Defaults:** Baseline memory map and instruction-cache geometry.
//! 2. **Structures:** Hierarchical config for general run control, memory, and the instruction cache.
//! 3. **Enums:** Cache replacement policy.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_file`); every field
//! is optional and falls back to the defaults below. Use `Config::default()` when no file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the emulator.
///
/// These values define the baseline machine when not explicitly overridden
/// in a JSON configuration file.
mod defaults {
    /// Base address of program RAM (2 GiB).
    ///
    /// Kept well away from address 0 so the sentinel return address is never mapped.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Size of program RAM (16 MiB).
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Base address of the stack region.
    pub const STACK_BASE: u64 = 0x7FF0_0000;

    /// Size of the stack region (64 KiB).
    pub const STACK_SIZE: usize = 64 * 1024;

    /// Default instruction cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid configuration JSON.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the cache line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the oldest cache line in the set (round-robin).
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a pseudo-randomly selected cache line from the set.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rv64emu_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "general": { "max_instructions": 1000 },
///     "icache": { "enabled": true, "ways": 2, "policy": "FIFO" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_instructions, Some(1000));
/// assert!(config.icache.enabled);
/// assert_eq!(config.icache.ways, 2);
/// assert_eq!(config.icache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.memory.ram_base, 0x8000_0000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Guest memory map
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Instruction cache configuration
    #[serde(default)]
    pub icache: CacheConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the text is malformed or a field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or `ConfigError::Json`
    /// if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event with the disassembly of every retired instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Abort the run after this many instructions (no limit when absent)
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

/// Guest memory map.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Program RAM base address
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u64,

    /// Program RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Stack region base address; `sp` starts at `stack_base + stack_size`
    #[serde(default = "MemoryConfig::default_stack_base")]
    pub stack_base: u64,

    /// Stack region size in bytes
    #[serde(default = "MemoryConfig::default_stack_size")]
    pub stack_size: usize,
}

impl MemoryConfig {
    /// Returns the default RAM base address.
    const fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size in bytes.
    const fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    /// Returns the default stack base address.
    const fn default_stack_base() -> u64 {
        defaults::STACK_BASE
    }

    /// Returns the default stack size in bytes.
    const fn default_stack_size() -> usize {
        defaults::STACK_SIZE
    }

    /// Returns the initial stack pointer (one past the top of the stack region).
    pub const fn stack_top(&self) -> u64 {
        self.stack_base.wrapping_add(self.stack_size as u64)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            stack_base: defaults::STACK_BASE,
            stack_size: defaults::STACK_SIZE,
        }
    }
}

/// Instruction cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Route instruction fetches through the cache
    #[serde(default)]
    pub enabled: bool,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    const fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// Cache is disabled by default and direct-mapped with LRU replacement.
    fn default() -> Self {
        Self {
            enabled: false,
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
        }
    }
}
