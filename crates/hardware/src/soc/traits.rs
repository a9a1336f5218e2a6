//! Device trait for bus-attached address regions.
//!
//! This module defines the `Device` trait implemented by every component the bus routes to. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Bulk access:** `read_bytes`/`write_bytes` at device-relative offsets, which every
//!    implementor supplies.
//! 3. **Sized access:** Little-endian byte, half, word, and doubleword helpers built on the
//!    bulk methods.
//!
//! The bus checks that an access lies entirely inside one device before calling it, so
//! implementors may assume `offset + len <= size`.

/// Trait for address regions attached to the emulator bus.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"RAM"`, `"STACK"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u64, u64);

    /// Copies `buf.len()` bytes starting at `offset` into `buf`.
    fn read_bytes(&self, offset: u64, buf: &mut [u8]);

    /// Writes `data` starting at `offset`.
    fn write_bytes(&mut self, offset: u64, data: &[u8]);

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&self, offset: u64) -> u8 {
        let mut buf = [0; 1];
        self.read_bytes(offset, &mut buf);
        buf[0]
    }

    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&self, offset: u64) -> u16 {
        let mut buf = [0; 2];
        self.read_bytes(offset, &mut buf);
        u16::from_le_bytes(buf)
    }

    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&self, offset: u64) -> u32 {
        let mut buf = [0; 4];
        self.read_bytes(offset, &mut buf);
        u32::from_le_bytes(buf)
    }

    /// Reads eight bytes (little-endian) at the given offset.
    fn read_u64(&self, offset: u64) -> u64 {
        let mut buf = [0; 8];
        self.read_bytes(offset, &mut buf);
        u64::from_le_bytes(buf)
    }

    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u64, val: u8) {
        self.write_bytes(offset, &[val]);
    }

    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u64, val: u16) {
        self.write_bytes(offset, &val.to_le_bytes());
    }

    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32) {
        self.write_bytes(offset, &val.to_le_bytes());
    }

    /// Writes eight bytes (little-endian) at the given offset.
    fn write_u64(&mut self, offset: u64, val: u64) {
        self.write_bytes(offset, &val.to_le_bytes());
    }
}
