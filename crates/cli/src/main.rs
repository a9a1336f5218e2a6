//! RV64 functional emulator CLI.
//!
//! This binary is the host front end of the emulator. It provides:
//! 1. **Run:** Load a raw or ELF program, call one procedure with up to four
//!    arguments, and report its return value and instruction mix.
//! 2. **Disasm:** List the instruction words of a raw image with their disassembly.
//!
//! Exit status is 0 on success, 2 when the program hits an unsupported
//! instruction, and 1 on any other failure.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rv64emu_core::common::constants::NUM_ARGS;
use rv64emu_core::config::{Config, ConfigError};
use rv64emu_core::isa::disasm::disassemble;
use rv64emu_core::sim::loader::{self, LoadError};
use rv64emu_core::{AnalysisCounters, Cpu, EmuError};

#[derive(Parser, Debug)]
#[command(
    name = "rv64emu",
    author,
    version,
    about = "RV64 user-level functional emulator",
    long_about = "Run a compiled RV64I/M procedure and profile its instruction mix.\n\nExamples:\n  rv64emu run sum.bin 10 32\n  rv64emu run --entry fib prog.elf 20\n  rv64emu run --icache --json sum.bin 1 2\n  rv64emu disasm sum.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one procedure and print its return value and analysis.
    Run(RunArgs),

    /// Disassemble the words of a raw image.
    Disasm {
        /// Raw program image.
        program: PathBuf,

        /// Guest address of the first word (default: RAM base).
        #[arg(long, value_parser = parse_addr)]
        load_addr: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Program image (raw binary or RV64 ELF).
    program: PathBuf,

    /// Entry point: a symbol name (ELF only) or an address.
    #[arg(long)]
    entry: Option<String>,

    /// Guest address a raw image is loaded at (default: RAM base).
    #[arg(long, value_parser = parse_addr)]
    load_addr: Option<u64>,

    /// Fetch through the instruction cache.
    #[arg(long)]
    icache: bool,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every executed instruction.
    #[arg(long)]
    trace: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Values for a0-a3 (decimal, negative, or 0x-prefixed hexadecimal).
    #[arg(
        num_args = 0..=NUM_ARGS,
        allow_negative_numbers = true,
        value_parser = parse_value
    )]
    args: Vec<u64>,
}

/// Host-side failure, mapped to the process exit status.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Emu(#[from] EmuError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("--entry {0:?} is a symbol name, which needs an ELF program")]
    SymbolInRawImage(String),
}

/// `--json` output of a run.
#[derive(Debug, Serialize)]
struct Report {
    return_value: u64,
    analysis: AnalysisCounters,
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Emu(err) if err.is_unsupported() => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let trace = matches!(&cli.command, Commands::Run(args) if args.trace);
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Disasm { program, load_addr } => cmd_disasm(&program, load_addr),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` applies unless `trace` forces trace level.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the program, runs the selected procedure, and prints the report.
fn cmd_run(args: &RunArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.icache.enabled |= args.icache;
    config.general.trace_instructions |= args.trace;

    let mut cpu = Cpu::new(&config)?;
    let data = loader::load_binary(&args.program)?;

    let entry = if loader::is_elf(&data) {
        let image = loader::load_elf(&mut cpu.bus, &data)?;
        match &args.entry {
            Some(name) => image.resolve(name)?,
            None => image.entry,
        }
    } else {
        let load_addr = args.load_addr.unwrap_or(config.memory.ram_base);
        loader::load_raw(&mut cpu.bus, &data, load_addr)?;
        match &args.entry {
            Some(name) => loader::parse_address(name)
                .map_err(|_| CliError::SymbolInRawImage(name.clone()))?,
            None => load_addr,
        }
    };

    let mut regs = [0; NUM_ARGS];
    for (slot, &val) in regs.iter_mut().zip(&args.args) {
        *slot = val;
    }

    info!(
        program = %args.program.display(),
        entry = format_args!("{entry:#x}"),
        icache = config.icache.enabled,
        "starting run"
    );
    cpu.initialize(entry, regs);
    let value = cpu.emulate()?;
    let analysis = cpu.analysis();

    if args.json {
        let report = Report {
            return_value: value,
            analysis,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Return value = {} ({value:#x})", value as i64);
        analysis.print();
    }
    Ok(())
}

/// Prints one line per 32-bit word: address, raw encoding, and disassembly.
fn cmd_disasm(program: &Path, load_addr: Option<u64>) -> Result<(), CliError> {
    let data = loader::load_binary(program)?;
    let base = load_addr.unwrap_or_else(|| Config::default().memory.ram_base);

    for line in disasm_lines(&data, base) {
        println!("{line}");
    }
    Ok(())
}

/// Formats each whole word of `data`; addresses wrap around the top of the space.
fn disasm_lines(data: &[u8], base: u64) -> impl Iterator<Item = String> + '_ {
    data.chunks_exact(4).enumerate().map(move |(i, chunk)| {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let addr = base.wrapping_add((i as u64).wrapping_mul(4));
        format!("{addr:#010x}:  {word:08x}  {}", disassemble(word))
    })
}

fn parse_addr(text: &str) -> Result<u64, String> {
    loader::parse_address(text).map_err(|e| e.to_string())
}

/// Parses a register argument; negative decimals are stored two's complement.
fn parse_value(text: &str) -> Result<u64, String> {
    if text.starts_with('-') {
        text.parse::<i64>()
            .map(|v| v as u64)
            .map_err(|e| format!("invalid argument {text:?}: {e}"))
    } else {
        parse_addr(text)
    }
}
