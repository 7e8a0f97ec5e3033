//! Binary to hex conversion

use crate::constants::{DEFAULT_BYTES_PER_RECORD, MAX_RECORD_DATA};
use crate::error::ConvertError;
use crate::types::Address;
use alloc::format;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::debug;

/// Parameters of a conversion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Load offset of the first input byte
    pub start_address: Address,

    /// Data bytes per record (1 to 255)
    pub bytes_per_record: usize,
}

impl ConvertConfig {
    /// Check that a record can carry `bytes_per_record` bytes
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.bytes_per_record == 0 || self.bytes_per_record > MAX_RECORD_DATA {
            return Err(ConvertError::InvalidConfig(format!(
                "bytes per record must be between 1 and {}, got {}",
                MAX_RECORD_DATA, self.bytes_per_record
            )));
        }
        Ok(())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            start_address: 0,
            bytes_per_record: DEFAULT_BYTES_PER_RECORD,
        }
    }
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Input bytes consumed
    pub bytes_read: usize,

    /// Data records emitted
    pub data_records: usize,

    /// All records emitted, including the address and end of file records
    pub records_written: usize,

    /// Load offset of the first data record
    pub start_address: Address,

    /// Load offset the next data record would have used (wraps at 64 KiB)
    pub next_offset: Address,
}

/// Fill `buf` from `reader`, stopping early only at end of input
#[cfg(feature = "std")]
fn read_chunk<R: std::io::Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Convert a byte stream into Intel HEX records
///
/// The output is always:
/// 1. One extended linear address record with value 0
/// 2. One data record per chunk of `bytes_per_record` input bytes, starting at
///    `start_address`; the load offset wraps silently at 64 KiB
/// 3. One end of file record with start address 0
///
/// Any read or write failure aborts the run.
#[cfg(feature = "std")]
pub fn bin_to_hex<R: std::io::Read, W: std::io::Write>(
    reader: &mut R,
    writer: &mut W,
    config: &ConvertConfig,
) -> Result<ConvertStats, ConvertError> {
    use crate::encoder::RecordWriter;
    use alloc::vec;

    config.validate()?;

    #[cfg(feature = "logging")]
    debug!(
        "Starting conversion at {:#06x}, {} bytes per record",
        config.start_address, config.bytes_per_record
    );

    let mut records = RecordWriter::new(writer);
    let mut stats = ConvertStats {
        start_address: config.start_address,
        ..Default::default()
    };

    records.extended_linear_address(0x0000)?;

    let mut chunk = vec![0u8; config.bytes_per_record];
    let mut offset = config.start_address;

    loop {
        let count = read_chunk(reader, &mut chunk)?;
        if count == 0 {
            break;
        }

        records.data(offset, &chunk[..count])?;

        stats.bytes_read += count;
        stats.data_records += 1;
        offset = offset.wrapping_add(count as u16);
    }

    records.end_of_file(0x0000)?;

    stats.records_written = records.records_written();
    stats.next_offset = offset;
    records.into_inner()?;

    #[cfg(feature = "logging")]
    debug!(
        "Conversion complete: {} bytes in {} data records",
        stats.bytes_read, stats.data_records
    );

    Ok(stats)
}
