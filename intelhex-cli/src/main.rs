use anyhow::Result;
use clap::{Parser, Subcommand};
use intelhex_cli::{bin2hex, hex2bin, parse_address};
use intelhex_core::constants::DEFAULT_BYTES_PER_RECORD;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "intelhex")]
#[command(about = "Convert between raw binary images and Intel HEX", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a binary file as Intel HEX records
    Bin2hex {
        /// Input binary file (stdin when absent or "-")
        input: Option<String>,

        /// Load address: decimal, or suffixed with H, O/Q, B or D
        #[arg(short, long, value_parser = parse_address, default_value = "0")]
        address: u16,

        /// Output file (stdout when absent or "-")
        #[arg(short, long)]
        output: Option<String>,

        /// Data bytes per record
        #[arg(long, default_value_t = DEFAULT_BYTES_PER_RECORD as u8,
              value_parser = clap::value_parser!(u8).range(1..))]
        bytes_per_record: u8,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<String>,
    },

    /// Rebuild a binary image from Intel HEX records
    Hex2bin {
        /// Input HEX file (stdin when absent or "-")
        input: Option<String>,

        /// Output file (stdout when absent or "-")
        #[arg(short, long)]
        output: Option<String>,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging; stdout may carry converted data so logs go to stderr.
    // A plain run prints bare diagnostics such as `line 3: invalid record format`.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_level(cli.verbose)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    // Execute command
    match command {
        Commands::Bin2hex {
            input,
            address,
            output,
            bytes_per_record,
            report,
        } => bin2hex::execute(
            input.as_deref(),
            output.as_deref(),
            address,
            bytes_per_record as usize,
            report.as_deref(),
        )
        .map(|_| ()),

        Commands::Hex2bin {
            input,
            output,
            report,
        } => hex2bin::execute(input.as_deref(), output.as_deref(), report.as_deref()).map(|_| ()),
    }
}
