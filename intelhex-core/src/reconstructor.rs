//! Hex to binary reconstruction
//!
//! Lines are decoded one at a time and every data record is loaded into a
//! [`MemoryImage`]. Malformed lines are skipped and reported, up to a cap;
//! a data record wider than the staging buffer aborts the run.

use crate::constants::{MAX_WARNINGS, STAGING_CAPACITY};
use crate::decoder::decode_record;
use crate::error::{ConvertError, DecodeError};
use crate::image::MemoryImage;
use crate::types::{Address, Record};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Parameters of a reconstruction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructConfig {
    /// Largest data record payload accepted; wider records abort the run
    pub staging_capacity: usize,

    /// Warnings reported before the rest are suppressed
    pub max_warnings: usize,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            staging_capacity: STAGING_CAPACITY,
            max_warnings: MAX_WARNINGS,
        }
    }
}

/// What to do with a newly counted warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningAction {
    /// Report it
    Report,
    /// The cap was just reached: report that further warnings are suppressed
    Suppress,
    /// Past the cap: stay quiet
    Silent,
}

/// Counts recoverable decode failures for one run
#[derive(Debug, Clone)]
pub struct WarningCounter {
    count: usize,
    cap: usize,
}

impl WarningCounter {
    /// Create a counter that stops reporting at `cap`
    pub fn new(cap: usize) -> Self {
        Self { count: 0, cap }
    }

    /// Count one warning and decide whether it is reported
    pub fn record(&mut self) -> WarningAction {
        self.count += 1;
        if self.count < self.cap {
            WarningAction::Report
        } else if self.count == self.cap {
            WarningAction::Suppress
        } else {
            WarningAction::Silent
        }
    }

    /// Warnings counted so far, reported or not
    pub fn count(&self) -> usize {
        self.count
    }
}

/// One reported warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A line that could not be decoded
    InvalidRecord {
        /// 1-based line number
        line: usize,
        /// Why decoding failed
        error: DecodeError,
    },

    /// The warning cap was reached at this line
    Suppressed {
        /// 1-based line number
        line: usize,
    },
}

impl Diagnostic {
    /// Line the diagnostic refers to
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::InvalidRecord { line, .. } | Diagnostic::Suppressed { line } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidRecord { line, .. } => {
                write!(f, "line {}: invalid record format", line)
            }
            Diagnostic::Suppressed { line } => {
                write!(f, "line {}: too many warnings, will no longer report", line)
            }
        }
    }
}

/// Whether the caller should keep feeding lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Feed the next line
    Continue,
    /// End of file record seen; stop reading
    Stop,
}

/// Reconstruction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructStats {
    /// Lines fed to the reconstructor
    pub lines_read: usize,

    /// Data records loaded into the image
    pub data_records: usize,

    /// Extended linear address records seen (parsed, not applied)
    pub extended_linear_records: usize,

    /// Valid records whose payload was discarded
    pub ignored_records: usize,

    /// Recoverable decode failures, reported or suppressed
    pub warnings: usize,

    /// Data bytes stored in the image
    pub bytes_loaded: usize,

    /// Data bytes past the top of the address space
    pub bytes_dropped: usize,

    /// Whether an end of file record terminated the input
    pub end_of_file_seen: bool,
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Image bytes over `[start_address, end_address)`
    pub data: Vec<u8>,

    /// Address of `data[0]`, `None` when no data was loaded
    pub start_address: Option<Address>,

    /// Warnings reported during the run
    pub diagnostics: Vec<Diagnostic>,

    /// Run statistics
    pub stats: ReconstructStats,
}

/// Rebuilds a binary image from record lines
pub struct Reconstructor {
    config: ReconstructConfig,
    image: MemoryImage,
    warnings: WarningCounter,
    diagnostics: Vec<Diagnostic>,
    stats: ReconstructStats,
}

impl Reconstructor {
    /// Create a reconstructor for one run
    pub fn new(config: ReconstructConfig) -> Self {
        Self {
            config,
            image: MemoryImage::new(),
            warnings: WarningCounter::new(config.max_warnings),
            diagnostics: Vec::new(),
            stats: ReconstructStats::default(),
        }
    }

    /// Process one raw line, terminator included
    pub fn feed_line(&mut self, line: &[u8]) -> Result<Flow, ConvertError> {
        if self.stats.end_of_file_seen {
            return Ok(Flow::Stop);
        }

        self.stats.lines_read += 1;
        let line_no = self.stats.lines_read;

        match decode_record(line, self.config.staging_capacity) {
            Ok(Record::Data { offset, bytes }) => {
                let stored = self.image.write(offset, &bytes);
                self.stats.data_records += 1;
                self.stats.bytes_loaded += stored;

                if stored < bytes.len() {
                    let dropped = bytes.len() - stored;
                    self.stats.bytes_dropped += dropped;

                    #[cfg(feature = "logging")]
                    warn!(
                        "line {}: {} bytes past the end of the address space dropped",
                        line_no, dropped
                    );
                }
            }
            Ok(Record::EndOfFile { .. }) => {
                self.stats.end_of_file_seen = true;
                return Ok(Flow::Stop);
            }
            Ok(Record::ExtendedLinearAddress { value: _value }) => {
                self.stats.extended_linear_records += 1;

                #[cfg(feature = "logging")]
                debug!(
                    "line {}: extended linear address {:#06x} not applied",
                    line_no, _value
                );
            }
            Ok(Record::Ignorable(_kind)) => {
                self.stats.ignored_records += 1;

                #[cfg(feature = "logging")]
                debug!("line {}: {} record ignored", line_no, _kind);
            }
            Err(DecodeError::BufferTooSmall { needed, capacity }) => {
                return Err(ConvertError::LineTooLong {
                    line: line_no,
                    needed,
                    capacity,
                });
            }
            Err(error) => self.warn(line_no, error),
        }

        Ok(Flow::Continue)
    }

    fn warn(&mut self, line: usize, error: DecodeError) {
        self.stats.warnings += 1;

        let diagnostic = match self.warnings.record() {
            WarningAction::Report => Diagnostic::InvalidRecord { line, error },
            WarningAction::Suppress => Diagnostic::Suppressed { line },
            WarningAction::Silent => return,
        };

        #[cfg(feature = "logging")]
        warn!("{}", diagnostic);

        self.diagnostics.push(diagnostic);
    }

    /// Image built so far
    pub fn image(&self) -> &MemoryImage {
        &self.image
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Statistics so far
    pub fn stats(&self) -> &ReconstructStats {
        &self.stats
    }

    /// Finish the run and extract the populated range of the image
    pub fn finish(self) -> Reconstruction {
        let start_address = if self.image.is_empty() {
            None
        } else {
            Some(self.image.start_address())
        };

        Reconstruction {
            data: self.image.populated().to_vec(),
            start_address,
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }
}

/// Reconstruct an image from in-memory text
pub fn reconstruct_str(
    text: &str,
    config: &ReconstructConfig,
) -> Result<Reconstruction, ConvertError> {
    let mut reconstructor = Reconstructor::new(*config);

    for line in text.split_inclusive('\n') {
        if reconstructor.feed_line(line.as_bytes())? == Flow::Stop {
            break;
        }
    }

    Ok(reconstructor.finish())
}

/// Reconstruct an image from a line source without writing it anywhere
#[cfg(feature = "std")]
pub fn reconstruct<R: std::io::BufRead>(
    reader: &mut R,
    config: &ReconstructConfig,
) -> Result<Reconstruction, ConvertError> {
    let mut reconstructor = Reconstructor::new(*config);
    let mut line = Vec::new();

    #[cfg(feature = "logging")]
    debug!("Starting reconstruction");

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if reconstructor.feed_line(&line)? == Flow::Stop {
            break;
        }
    }

    let result = reconstructor.finish();

    #[cfg(feature = "logging")]
    debug!(
        "Reconstruction complete: {} lines, {} data records, {} bytes loaded, {} warnings",
        result.stats.lines_read,
        result.stats.data_records,
        result.stats.bytes_loaded,
        result.stats.warnings
    );

    Ok(result)
}

/// Reconstruct an image from `reader` and write its populated range to `writer`
///
/// Nothing is written if reading fails or a record exceeds the staging buffer.
#[cfg(feature = "std")]
pub fn hex_to_bin<R: std::io::BufRead, W: std::io::Write>(
    reader: &mut R,
    writer: &mut W,
    config: &ReconstructConfig,
) -> Result<Reconstruction, ConvertError> {
    let result = reconstruct(reader, config)?;

    writer.write_all(&result.data)?;
    writer.flush()?;

    Ok(result)
}
