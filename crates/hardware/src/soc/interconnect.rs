//! Guest address-space interconnect (bus).
//!
//! This module implements the bus that routes guest address accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range, kept sorted, and may not overlap.
//! 2. **Access routing:** Sized little-endian reads and writes, each of which must fall entirely
//!    inside one device. Anything else is an `AccessFault` rather than a host memory access.
//! 3. **Binary loading:** `load_binary_at` for the program loader.

use std::fmt;

use tracing::warn;

use crate::common::{AccessType, EmuError, Result};
use crate::soc::traits::Device;

/// Guest address space; routes accesses by address to the owning device.
#[derive(Default)]
pub struct Bus {
    /// Registered regions, sorted by base address.
    devices: Vec<Box<dyn Device>>,
}

impl Bus {
    /// Creates an empty bus; add regions with `add_device`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device on the bus.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::InvalidConfig` if the device is empty, wraps past the
    /// end of the address space, or overlaps an already registered device.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<()> {
        let (base, size) = dev.address_range();
        let end = base.checked_add(size).filter(|_| size > 0).ok_or_else(|| {
            EmuError::InvalidConfig(format!(
                "region {} at {base:#x} with size {size:#x} is empty or wraps",
                dev.name()
            ))
        })?;

        if let Some(other) = self.devices.iter().find(|d| {
            let (b, s) = d.address_range();
            base < b + s && b < end
        }) {
            return Err(EmuError::InvalidConfig(format!(
                "region {} overlaps region {}",
                dev.name(),
                other.name()
            )));
        }

        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        Ok(())
    }

    /// Returns the names and ranges of all registered regions, lowest base first.
    pub fn regions(&self) -> impl Iterator<Item = (&str, u64, u64)> {
        self.devices.iter().map(|d| {
            let (base, size) = d.address_range();
            (d.name(), base, size)
        })
    }

    /// Returns the base and size of the region with the given name.
    pub fn region(&self, name: &str) -> Option<(u64, u64)> {
        self.devices
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.address_range())
    }

    /// Returns whether the given guest address is backed by any device.
    pub fn is_valid_address(&self, addr: u64) -> bool {
        self.find_device(addr, 1).is_some()
    }

    /// Returns whether `[addr, addr + len)` lies entirely inside one device.
    pub fn contains_range(&self, addr: u64, len: u64) -> bool {
        self.find_device(addr, len).is_some()
    }

    /// Writes a binary blob into guest memory at the given address.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::AccessFault` unless the whole blob fits in one device.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u64) -> Result<()> {
        self.write_bytes(addr, data)
    }

    /// Copies `buf.len()` bytes starting at `addr` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::AccessFault` tagged with `access` if the range is not
    /// inside a single device.
    pub fn read_bytes(&self, addr: u64, buf: &mut [u8], access: AccessType) -> Result<()> {
        let size = buf.len() as u64;
        let (idx, offset) = self.route(addr, size, access)?;
        self.devices[idx].read_bytes(offset, buf);
        Ok(())
    }

    /// Writes `data` starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns `EmuError::AccessFault` if the range is not inside a single device.
    pub fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<()> {
        let (idx, offset) = self.route(addr, data.len() as u64, AccessType::Write)?;
        self.devices[idx].write_bytes(offset, data);
        Ok(())
    }

    /// Fetches the 32-bit instruction word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` with `AccessType::Fetch` if `addr` is unmapped.
    pub fn fetch_u32(&self, addr: u64) -> Result<u32> {
        let (idx, offset) = self.route(addr, 4, AccessType::Fetch)?;
        Ok(self.devices[idx].read_u32(offset))
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if `addr` is unmapped.
    pub fn read_u8(&self, addr: u64) -> Result<u8> {
        let (idx, offset) = self.route(addr, 1, AccessType::Read)?;
        Ok(self.devices[idx].read_u8(offset))
    }

    /// Reads two bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn read_u16(&self, addr: u64) -> Result<u16> {
        let (idx, offset) = self.route(addr, 2, AccessType::Read)?;
        Ok(self.devices[idx].read_u16(offset))
    }

    /// Reads four bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn read_u32(&self, addr: u64) -> Result<u32> {
        let (idx, offset) = self.route(addr, 4, AccessType::Read)?;
        Ok(self.devices[idx].read_u32(offset))
    }

    /// Reads eight bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn read_u64(&self, addr: u64) -> Result<u64> {
        let (idx, offset) = self.route(addr, 8, AccessType::Read)?;
        Ok(self.devices[idx].read_u64(offset))
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if `addr` is unmapped.
    pub fn write_u8(&mut self, addr: u64, val: u8) -> Result<()> {
        let (idx, offset) = self.route(addr, 1, AccessType::Write)?;
        self.devices[idx].write_u8(offset, val);
        Ok(())
    }

    /// Writes two bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn write_u16(&mut self, addr: u64, val: u16) -> Result<()> {
        let (idx, offset) = self.route(addr, 2, AccessType::Write)?;
        self.devices[idx].write_u16(offset, val);
        Ok(())
    }

    /// Writes four bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn write_u32(&mut self, addr: u64, val: u32) -> Result<()> {
        let (idx, offset) = self.route(addr, 4, AccessType::Write)?;
        self.devices[idx].write_u32(offset, val);
        Ok(())
    }

    /// Writes eight bytes (little-endian).
    ///
    /// # Errors
    ///
    /// Returns an `AccessFault` if any byte is unmapped.
    pub fn write_u64(&mut self, addr: u64, val: u64) -> Result<()> {
        let (idx, offset) = self.route(addr, 8, AccessType::Write)?;
        self.devices[idx].write_u64(offset, val);
        Ok(())
    }

    fn route(&self, addr: u64, size: u64, access: AccessType) -> Result<(usize, u64)> {
        self.find_device(addr, size).ok_or_else(|| {
            warn!(addr = format_args!("{addr:#x}"), size, %access, "unmapped guest access");
            EmuError::AccessFault { addr, size, access }
        })
    }

    fn find_device(&self, addr: u64, size: u64) -> Option<(usize, u64)> {
        let end = addr.checked_add(size)?;
        self.devices.iter().enumerate().find_map(|(idx, d)| {
            let (start, len) = d.address_range();
            (addr >= start && end <= start + len).then(|| (idx, addr - start))
        })
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.regions()
                    .map(|(name, base, size)| format!("{name} [{base:#x}, {:#x})", base + size)),
            )
            .finish()
    }
}
