//! Subcommand implementations and the stream plumbing they share

pub mod bin2hex;
pub mod hex2bin;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// Open `path` for reading; `None` or `-` means stdin
pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Create `path` for writing; `None` or `-` means stdout
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        None | Some("-") => Ok(Box::new(BufWriter::new(io::stdout()))),
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

/// Write run statistics as pretty JSON
pub fn write_report<T: Serialize>(path: &str, stats: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(stats).with_context(|| "Failed to serialize run report")?;

    fs::write(path, json).with_context(|| format!("Failed to write report file: {}", path))?;

    Ok(())
}
