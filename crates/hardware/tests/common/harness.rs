use rv64emu_core::common::Result;
use rv64emu_core::config::{Config, MemoryConfig};
use rv64emu_core::core::Cpu;
use rv64emu_core::core::units::cache::InstructionCache;
use tracing_subscriber::EnvFilter;

/// Base of the test RAM region.
pub const RAM_BASE: u64 = 0x8000_0000;

/// Base of the test stack region.
pub const STACK_BASE: u64 = 0x7FF0_0000;

/// Size of each test region. Small so every test allocates little.
pub const REGION_SIZE: usize = 0x1_0000;

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default configuration with small memory regions.
pub fn test_config() -> Config {
    Config {
        memory: MemoryConfig {
            ram_base: RAM_BASE,
            ram_size: REGION_SIZE,
            stack_base: STACK_BASE,
            stack_size: REGION_SIZE,
        },
        ..Config::default()
    }
}

pub struct TestContext {
    pub cpu: Cpu,
    pub entry: u64,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&test_config())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let cpu = Cpu::new(config).unwrap();
        Self {
            cpu,
            entry: config.memory.ram_base,
        }
    }

    /// Builds a CPU around the given cache collaborator.
    pub fn with_icache(icache: Box<dyn InstructionCache + Send>, enabled: bool) -> Self {
        init_tracing();
        let mut config = test_config();
        config.icache.enabled = enabled;
        let cpu = Cpu::with_icache(&config, icache).unwrap();
        Self {
            cpu,
            entry: RAM_BASE,
        }
    }

    /// Loads a sequence of 32-bit instructions at the RAM base and makes it the entry point.
    pub fn load_program(self, instructions: &[u32]) -> Self {
        self.load_program_at(RAM_BASE, instructions)
    }

    /// Loads a sequence of 32-bit instructions at `addr` and makes it the entry point.
    pub fn load_program_at(mut self, addr: u64, instructions: &[u32]) -> Self {
        for (i, inst) in instructions.iter().enumerate() {
            self.cpu.bus.write_u32(addr + (i as u64) * 4, *inst).unwrap();
        }
        self.entry = addr;
        self
    }

    /// Seeds registers and the stack pointer for a run from the entry point.
    pub fn initialize(&mut self, args: [u64; 4]) {
        self.cpu.initialize(self.entry, args);
    }

    /// Initializes and runs to the sentinel return address.
    pub fn run(&mut self, args: [u64; 4]) -> Result<u64> {
        self.initialize(args);
        self.cpu.emulate()
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u64 {
        self.cpu.regs.read(reg)
    }
}
