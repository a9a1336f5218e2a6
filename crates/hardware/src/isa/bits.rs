//! Bit-field utilities.
//!
//! Helpers shared by the immediate decoders and the disassembler for pulling
//! fields out of an instruction word and widening them to 64 bits.

/// Returns the `width`-bit unsigned field that starts at bit `start` of `word`.
///
/// Bits are numbered least-significant first. Callers guarantee
/// `start + width <= 32`; a `width` of 32 yields the whole word.
///
/// # Examples
///
/// ```
/// use rv64emu_core::isa::bits::extract_bits;
///
/// // opcode of `addi x1, x0, 5`
/// assert_eq!(extract_bits(0x0050_0093, 0, 7), 0b001_0011);
/// // rd field
/// assert_eq!(extract_bits(0x0050_0093, 7, 5), 1);
/// ```
#[inline(always)]
pub const fn extract_bits(word: u32, start: u32, width: u32) -> u32 {
    debug_assert!(start + width <= 32);
    let mask = if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    };
    (word >> start) & mask
}

/// Sign-extends the low `width` bits of `value` to a signed 64-bit integer.
///
/// Bit `width - 1` is the sign bit. `width` must lie in `1..=64`.
///
/// # Examples
///
/// ```
/// use rv64emu_core::isa::bits::sign_extend;
///
/// assert_eq!(sign_extend(0xFFF, 12), -1);
/// assert_eq!(sign_extend(0x7FF, 12), 2047);
/// assert_eq!(sign_extend(0x1000, 13), -4096);
/// ```
#[inline(always)]
pub const fn sign_extend(value: u64, width: u32) -> i64 {
    debug_assert!(width >= 1 && width <= 64);
    let shift = 64 - width;
    ((value << shift) as i64) >> shift
}
