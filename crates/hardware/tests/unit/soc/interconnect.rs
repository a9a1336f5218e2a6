//! Bus Interconnect Tests.
//!
//! Region registration, little-endian routing, and the access faults raised
//! for anything that does not land entirely inside one region.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rv64emu_core::common::{AccessType, EmuError};
use rv64emu_core::config::MemoryConfig;
use rv64emu_core::soc::{Bus, Memory, RAM_NAME, STACK_NAME, build_bus};

const BASE: u64 = 0x1000;
const SIZE: usize = 0x100;

fn single_region() -> Bus {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new("MEM", BASE, SIZE))).unwrap();
    bus
}

#[test]
fn little_endian_layout() {
    let mut bus = single_region();
    bus.write_u64(BASE, 0x0102_0304_0506_0708).unwrap();

    assert_eq!(bus.read_u8(BASE).unwrap(), 0x08);
    assert_eq!(bus.read_u16(BASE).unwrap(), 0x0708);
    assert_eq!(bus.read_u32(BASE + 4).unwrap(), 0x0102_0304);
    assert_eq!(bus.fetch_u32(BASE).unwrap(), 0x0506_0708);

    let mut buf = [0; 3];
    bus.read_bytes(BASE + 1, &mut buf, AccessType::Read).unwrap();
    assert_eq!(buf, [0x07, 0x06, 0x05]);
}

#[test]
fn sized_writes_touch_only_their_bytes() {
    let mut bus = single_region();
    bus.write_u64(BASE, u64::MAX).unwrap();
    bus.write_u16(BASE + 2, 0).unwrap();
    bus.write_u8(BASE + 7, 0x12).unwrap();
    assert_eq!(bus.read_u64(BASE).unwrap(), 0x12FF_FFFF_0000_FFFF);
}

#[test]
fn memory_starts_zeroed() {
    let bus = single_region();
    assert_eq!(bus.read_u64(BASE + SIZE as u64 - 8).unwrap(), 0);
}

#[rstest]
#[case::below(BASE - 1, 1)]
#[case::past_end(BASE + SIZE as u64, 1)]
#[case::straddles_end(BASE + SIZE as u64 - 2, 4)]
#[case::straddles_start(BASE - 4, 8)]
#[case::wraps(u64::MAX - 1, 4)]
fn out_of_region_reads_fault(#[case] addr: u64, #[case] size: usize) {
    let bus = single_region();
    let mut buf = vec![0; size];
    let err = bus.read_bytes(addr, &mut buf, AccessType::Read).unwrap_err();
    assert_eq!(
        err,
        EmuError::AccessFault {
            addr,
            size: size as u64,
            access: AccessType::Read
        }
    );
}

#[test]
fn faults_carry_access_type() {
    let mut bus = single_region();
    let end = BASE + SIZE as u64;

    assert!(matches!(
        bus.fetch_u32(end - 2),
        Err(EmuError::AccessFault { access: AccessType::Fetch, size: 4, .. })
    ));
    assert!(matches!(
        bus.read_u64(end - 4),
        Err(EmuError::AccessFault { access: AccessType::Read, size: 8, .. })
    ));
    assert!(matches!(
        bus.write_u32(end - 1, 0),
        Err(EmuError::AccessFault { access: AccessType::Write, size: 4, .. })
    ));
}

#[test]
fn access_spanning_two_adjacent_regions_faults() {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new("LOW", 0x1000, 0x100))).unwrap();
    bus.add_device(Box::new(Memory::new("HIGH", 0x1100, 0x100))).unwrap();

    bus.write_u32(0x10FC, 1).unwrap();
    bus.write_u32(0x1100, 2).unwrap();
    assert!(bus.read_u64(0x10FC).is_err());
    assert!(!bus.contains_range(0x10FC, 8));
    assert!(bus.contains_range(0x10F8, 8));
}

#[rstest]
#[case::overlap_start(0x0F80, 0x100)]
#[case::overlap_end(0x10F0, 0x100)]
#[case::inside(0x1010, 0x10)]
#[case::covering(0x0800, 0x1000)]
fn overlapping_region_rejected(#[case] base: u64, #[case] size: usize) {
    let mut bus = single_region();
    let err = bus.add_device(Box::new(Memory::new("OTHER", base, size))).unwrap_err();
    assert!(matches!(err, EmuError::InvalidConfig(_)));
}

#[test]
fn empty_and_wrapping_regions_rejected() {
    let mut bus = Bus::new();
    assert!(bus.add_device(Box::new(Memory::new("EMPTY", 0x1000, 0))).is_err());
    assert!(bus.add_device(Box::new(Memory::new("WRAP", u64::MAX - 0xF, 0x20))).is_err());
    assert_eq!(bus.regions().count(), 0);
}

#[test]
fn regions_sorted_by_base() {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new("B", 0x2000, 0x10))).unwrap();
    bus.add_device(Box::new(Memory::new("A", 0x1000, 0x10))).unwrap();

    let regions: Vec<_> = bus.regions().collect();
    assert_eq!(regions, vec![("A", 0x1000, 0x10), ("B", 0x2000, 0x10)]);
    assert_eq!(bus.region("B"), Some((0x2000, 0x10)));
    assert_eq!(bus.region("C"), None);
    assert!(bus.is_valid_address(0x100F));
    assert!(!bus.is_valid_address(0x1010));
}

#[test]
fn load_binary_at_places_bytes() {
    let mut bus = single_region();
    bus.load_binary_at(&[1, 2, 3, 4], BASE + 0x10).unwrap();
    assert_eq!(bus.read_u32(BASE + 0x10).unwrap(), 0x0403_0201);
    assert!(bus.load_binary_at(&[0; 0x101], BASE).is_err());
}

// ══════════════════════════════════════════════════════════
// Memory map from configuration
// ══════════════════════════════════════════════════════════

#[test]
fn default_map_has_ram_and_stack() {
    let config = MemoryConfig::default();
    let bus = build_bus(&config).unwrap();

    assert_eq!(
        bus.region(RAM_NAME),
        Some((config.ram_base, config.ram_size as u64))
    );
    assert_eq!(
        bus.region(STACK_NAME),
        Some((config.stack_base, config.stack_size as u64))
    );
    assert!(!bus.is_valid_address(0));
    assert!(bus.contains_range(config.stack_top() - 8, 8));
    assert!(!bus.contains_range(config.stack_top(), 1));
}

#[test]
fn map_covering_stop_address_rejected() {
    let config = MemoryConfig {
        ram_base: 0,
        ..MemoryConfig::default()
    };
    assert!(matches!(build_bus(&config), Err(EmuError::InvalidConfig(_))));
}

#[test]
fn overlapping_ram_and_stack_rejected() {
    let config = MemoryConfig {
        stack_base: 0x8000_1000,
        ..MemoryConfig::default()
    };
    assert!(matches!(build_bus(&config), Err(EmuError::InvalidConfig(_))));
}
