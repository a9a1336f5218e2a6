//! Guest address-space construction.
//!
//! Builds the bus for one emulator instance from the memory configuration. It performs:
//! 1. **Region registration:** Maps program RAM and the stack region as `Memory` devices.
//! 2. **Map validation:** Rejects empty, overlapping, or wrapping regions, and any map that
//!    covers the sentinel return address (a return there must stop the run, not execute).

use tracing::debug;

use crate::common::{EmuError, Result, STOP_ADDRESS};
use crate::config::MemoryConfig;
use crate::soc::interconnect::Bus;
use crate::soc::memory::Memory;

/// Bus name of the program RAM region.
pub const RAM_NAME: &str = "RAM";

/// Bus name of the stack region.
pub const STACK_NAME: &str = "STACK";

/// Builds the guest bus described by `config`.
///
/// # Errors
///
/// Returns `EmuError::InvalidConfig` if a region is empty, regions overlap, or
/// the sentinel return address is mapped.
pub fn build_bus(config: &MemoryConfig) -> Result<Bus> {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new(
        RAM_NAME,
        config.ram_base,
        config.ram_size,
    )))?;
    bus.add_device(Box::new(Memory::new(
        STACK_NAME,
        config.stack_base,
        config.stack_size,
    )))?;

    if bus.is_valid_address(STOP_ADDRESS) {
        return Err(EmuError::InvalidConfig(format!(
            "memory map covers the stop address {STOP_ADDRESS:#x}"
        )));
    }

    debug!(
        ram_base = format_args!("{:#x}", config.ram_base),
        ram_size = config.ram_size,
        stack_base = format_args!("{:#x}", config.stack_base),
        stack_size = config.stack_size,
        "guest memory mapped"
    );
    Ok(bus)
}
