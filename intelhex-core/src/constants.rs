//! Constants and limits for the Intel HEX record format

/// Record mark that starts every record line
pub const RECORD_MARK: u8 = b':';

/// Header length in bytes: record length (1) + load offset (2) + record type (1)
pub const HEADER_LEN: usize = 4;

/// Shortest line that can hold a record: mark + hex header + hex checksum
/// 1 (mark) + 2 * 4 (header) + 2 (checksum) = 11 characters
pub const MIN_RECORD_CHARS: usize = 1 + 2 * HEADER_LEN + 2;

/// Character position of the first data byte (after mark and header)
pub const DATA_START: usize = 1 + 2 * HEADER_LEN;

/// Largest payload a single record can declare
pub const MAX_RECORD_DATA: usize = 0xFF;

/// Size of the staging buffer a decoded data record is copied into
pub const STAGING_CAPACITY: usize = 256;

/// Size of the addressable memory image (16-bit address space)
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Number of recoverable warnings reported before further ones are suppressed
pub const MAX_WARNINGS: usize = 10;

/// Default number of data bytes emitted per record
pub const DEFAULT_BYTES_PER_RECORD: usize = 32;

/// Payload length of an extended linear address record
pub const ELA_PAYLOAD_LEN: u8 = 2;

/// Intel HEX record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    /// Data record
    Data = 0x00,
    /// End of file record
    EndOfFile = 0x01,
    /// Extended segment address record
    ExtendedSegmentAddress = 0x02,
    /// Start segment address record
    StartSegmentAddress = 0x03,
    /// Extended linear address record
    ExtendedLinearAddress = 0x04,
    /// Start linear address record
    StartLinearAddress = 0x05,
}

impl RecordType {
    /// Raw record type byte
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Payload length required by address records, `None` for data and end of file
    pub const fn fixed_len(&self) -> Option<u8> {
        match self {
            RecordType::Data | RecordType::EndOfFile => None,
            RecordType::ExtendedSegmentAddress | RecordType::ExtendedLinearAddress => Some(2),
            RecordType::StartSegmentAddress | RecordType::StartLinearAddress => Some(4),
        }
    }
}

impl TryFrom<u8> for RecordType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(RecordType::Data),
            0x01 => Ok(RecordType::EndOfFile),
            0x02 => Ok(RecordType::ExtendedSegmentAddress),
            0x03 => Ok(RecordType::StartSegmentAddress),
            0x04 => Ok(RecordType::ExtendedLinearAddress),
            0x05 => Ok(RecordType::StartLinearAddress),
            other => Err(other),
        }
    }
}

impl core::fmt::Display for RecordType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            RecordType::Data => "data",
            RecordType::EndOfFile => "end of file",
            RecordType::ExtendedSegmentAddress => "extended segment address",
            RecordType::StartSegmentAddress => "start segment address",
            RecordType::ExtendedLinearAddress => "extended linear address",
            RecordType::StartLinearAddress => "start linear address",
        };
        f.write_str(name)
    }
}
