//! Program Loader.
//!
//! This module places guest programs into the emulator's address space. It performs:
//! 1. **File input:** Reads a program image from disk.
//! 2. **Raw images:** Copies a flat binary to a chosen guest address.
//! 3. **ELF images:** Copies each `PT_LOAD` segment of a little-endian RV64 ELF file to its
//!    virtual address, zero-fills the `.bss` tail, and collects the entry point and symbol table
//!    so a procedure can be selected by name.
//! 4. **Address parsing:** Accepts `0x`-prefixed hexadecimal or decimal addresses from the command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use object::elf::{EM_RISCV, PT_LOAD};
use object::read::elf::{ElfFile64, FileHeader, ProgramHeader};
use object::{LittleEndian, Object, ObjectSymbol};
use thiserror::Error;
use tracing::debug;

use crate::soc::Bus;

/// ELF magic number (`\x7fELF`).
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Failure to load a program.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed 64-bit little-endian ELF image.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::Error),

    /// The ELF image targets another machine.
    #[error("ELF machine {0} is not RISC-V")]
    WrongArch(u16),

    /// A program header points outside the file.
    #[error("segment at {addr:#x} extends past the end of the file")]
    TruncatedSegment {
        /// Segment virtual address.
        addr: u64,
    },

    /// A segment or raw image does not fit in mapped guest memory.
    #[error("{size:#x} bytes at {addr:#x} do not fit in guest memory")]
    OutsideMemory {
        /// First guest address of the image.
        addr: u64,
        /// Image size in bytes.
        size: u64,
    },

    /// No symbol with the requested name.
    #[error("symbol {0:?} not found")]
    MissingSymbol(String),

    /// Text that is neither a hexadecimal nor a decimal address.
    #[error("invalid address {0:?}")]
    BadAddress(String),
}

/// Entry point and symbol table of a loaded ELF image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElfImage {
    /// `e_entry` from the file header.
    pub entry: u64,
    /// Named symbols and their addresses.
    pub symbols: BTreeMap<String, u64>,
}

impl ElfImage {
    /// Looks up a symbol address by name.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingSymbol` if the image has no such symbol.
    pub fn symbol(&self, name: &str) -> Result<u64, LoadError> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::MissingSymbol(name.to_string()))
    }

    /// Resolves an entry-point argument: an address if `text` parses as one,
    /// otherwise a symbol name.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingSymbol` if `text` is neither.
    pub fn resolve(&self, text: &str) -> Result<u64, LoadError> {
        parse_address(text).or_else(|_| self.symbol(text))
    }
}

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Returns whether `data` starts with the ELF magic number.
pub fn is_elf(data: &[u8]) -> bool {
    data.starts_with(ELF_MAGIC)
}

/// Copies a flat binary image to `addr`.
///
/// # Errors
///
/// Returns `LoadError::OutsideMemory` unless the whole image fits in one mapped region.
pub fn load_raw(bus: &mut Bus, data: &[u8], addr: u64) -> Result<(), LoadError> {
    bus.load_binary_at(data, addr)
        .map_err(|_| LoadError::OutsideMemory {
            addr,
            size: data.len() as u64,
        })?;
    debug!(addr = format_args!("{addr:#x}"), size = data.len(), "raw image loaded");
    Ok(())
}

/// Loads the `PT_LOAD` segments of an RV64 ELF image.
///
/// Each segment's file bytes are copied to its virtual address and the remainder
/// up to its memory size is zero-filled.
///
/// # Errors
///
/// Returns `LoadError::Elf` for a malformed file, `LoadError::WrongArch` for a
/// non-RISC-V machine, `LoadError::TruncatedSegment` when segment data lies past the
/// end of the file, and `LoadError::OutsideMemory` when a segment is not mapped.
pub fn load_elf(bus: &mut Bus, data: &[u8]) -> Result<ElfImage, LoadError> {
    let elf = ElfFile64::<LittleEndian>::parse(data)?;
    let endian = elf.endian();

    let machine = elf.elf_header().e_machine(endian);
    if machine != EM_RISCV {
        return Err(LoadError::WrongArch(machine));
    }

    for ph in elf.elf_program_headers() {
        if ph.p_type(endian) != PT_LOAD {
            continue;
        }
        let addr = ph.p_vaddr(endian);
        let mem_size = ph.p_memsz(endian);
        if mem_size == 0 {
            continue;
        }
        if !bus.contains_range(addr, mem_size) {
            return Err(LoadError::OutsideMemory {
                addr,
                size: mem_size,
            });
        }

        let bytes = ph
            .data(endian, data)
            .map_err(|()| LoadError::TruncatedSegment { addr })?;
        load_raw(bus, bytes, addr)?;

        let file_size = bytes.len() as u64;
        if mem_size > file_size {
            let zeros = vec![0u8; (mem_size - file_size) as usize];
            load_raw(bus, &zeros, addr + file_size)?;
        }
        debug!(
            addr = format_args!("{addr:#x}"),
            file_size,
            mem_size,
            "segment loaded"
        );
    }

    let symbols = elf
        .symbols()
        .filter_map(|sym| {
            let name = sym.name().ok().filter(|n| !n.is_empty())?;
            Some((name.to_string(), sym.address()))
        })
        .collect();

    Ok(ElfImage {
        entry: elf.entry(),
        symbols,
    })
}

/// Parses a guest address written as `0x`-prefixed hexadecimal or decimal.
/// Underscores are ignored.
///
/// # Errors
///
/// Returns `LoadError::BadAddress` for anything else.
///
/// # Examples
///
/// ```
/// use rv64emu_core::sim::loader::parse_address;
///
/// assert_eq!(parse_address("0x8000_0000").unwrap(), 0x8000_0000);
/// assert_eq!(parse_address("4096").unwrap(), 4096);
/// assert!(parse_address("main").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<u64, LoadError> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse(),
    };
    parsed.map_err(|_| LoadError::BadAddress(text.to_string()))
}
