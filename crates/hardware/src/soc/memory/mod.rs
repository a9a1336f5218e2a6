//! Guest Memory Regions.
//!
//! A `Memory` is a zero-initialised, heap-backed byte region mapped at a fixed
//! guest base address. The emulator maps two of them: program RAM and the
//! stack.

use std::fmt;

use crate::soc::traits::Device;

/// A contiguous guest memory region.
pub struct Memory {
    name: String,
    base_addr: u64,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled region.
    ///
    /// # Arguments
    ///
    /// * `name` - Device name reported on the bus and in access faults.
    /// * `base_addr` - Starting guest address.
    /// * `size` - Region size in bytes.
    pub fn new(name: impl Into<String>, base_addr: u64, size: usize) -> Self {
        Self {
            name: name.into(),
            base_addr,
            data: vec![0; size],
        }
    }

    /// Returns the backing bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("name", &self.name)
            .field("base_addr", &format_args!("{:#x}", self.base_addr))
            .field("size", &self.data.len())
            .finish()
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.data.len() as u64)
    }

    fn read_bytes(&self, offset: u64, buf: &mut [u8]) {
        let start = offset as usize;
        if let Some(src) = self.data.get(start..start + buf.len()) {
            buf.copy_from_slice(src);
        }
    }

    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        let start = offset as usize;
        if let Some(dst) = self.data.get_mut(start..start + data.len()) {
            dst.copy_from_slice(data);
        }
    }
}
