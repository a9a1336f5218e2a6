//! RISC-V Application Binary Interface (ABI) register name constants.
//!
//! Register indices the host interface touches directly: the zero register,
//! the return-address and stack-pointer registers, and the four argument
//! registers seeded by `Cpu::initialize` (`a0` also carries the return value).

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Register x10 (first argument/return value, a0).
pub const REG_A0: usize = 10;
/// Register x11 (second argument, a1).
pub const REG_A1: usize = 11;
/// Register x12 (third argument, a2).
pub const REG_A2: usize = 12;
/// Register x13 (fourth argument, a3).
pub const REG_A3: usize = 13;

/// Argument registers in calling-convention order.
pub const ARG_REGS: [usize; 4] = [REG_A0, REG_A1, REG_A2, REG_A3];

/// ABI names for x0–x31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}
