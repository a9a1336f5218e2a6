//! Guest Address Space.
//!
//! This module organizes the components that make up the emulated address
//! space: the bus, the memory regions routed through it, the device trait,
//! and the builder that assembles RAM and stack from configuration.

/// Bus construction from the memory configuration.
pub mod builder;

/// Bus interconnect and address routing.
pub mod interconnect;

/// Heap-backed guest memory regions.
pub mod memory;

/// Device trait definitions for bus routing.
pub mod traits;

pub use builder::{RAM_NAME, STACK_NAME, build_bus};
pub use interconnect::Bus;
pub use memory::Memory;
pub use traits::Device;
