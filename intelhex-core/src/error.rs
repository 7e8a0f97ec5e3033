//! Error types for record decoding and conversion runs

use alloc::string::String;

/// Why a line that looked like a record was rejected
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Line is shorter than the smallest possible record
    #[cfg_attr(feature = "std", error("record too short: {0} characters"))]
    TooShort(usize),

    /// Line ends before the declared data and checksum
    #[cfg_attr(feature = "std", error("truncated record: expected {expected} characters, got {actual}"))]
    Truncated {
        /// Characters required by the declared record length
        expected: usize,
        /// Characters actually present
        actual: usize,
    },

    /// The character after the checksum is not a line terminator
    #[cfg_attr(feature = "std", error("missing line terminator after checksum"))]
    MissingTerminator,

    /// Header, data and checksum do not sum to zero
    #[cfg_attr(feature = "std", error("checksum mismatch: bytes sum to {0:#04x}"))]
    BadChecksum(u8),

    /// End of file record carrying data
    #[cfg_attr(feature = "std", error("end of file record with length {0}"))]
    BadEndOfFile(u8),

    /// Record type outside 0x00..=0x05
    #[cfg_attr(feature = "std", error("unknown record type {0:#04x}"))]
    UnknownType(u8),
}

/// Classified failure to decode one line
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Data record wider than the caller's staging buffer
    #[cfg_attr(feature = "std", error("data record of {needed} bytes exceeds buffer of {capacity} bytes"))]
    BufferTooSmall {
        /// Bytes declared by the record
        needed: usize,
        /// Bytes the staging buffer can hold
        capacity: usize,
    },

    /// Malformed record
    #[cfg_attr(feature = "std", error("invalid record format: {0}"))]
    InvalidFormat(FormatError),

    /// Empty line, no record mark, or an address record with the wrong shape
    #[cfg_attr(feature = "std", error("not a record"))]
    NotARecord,
}

impl DecodeError {
    /// Whether a conversion run can skip the line and continue
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DecodeError::BufferTooSmall { .. })
    }
}

impl From<FormatError> for DecodeError {
    fn from(err: FormatError) -> Self {
        DecodeError::InvalidFormat(err)
    }
}

/// Errors that abort a conversion run
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// IO error on the source or sink
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),

    /// Data record too wide for the staging buffer
    #[cfg_attr(feature = "std", error("line {line}: line too long"))]
    LineTooLong {
        /// 1-based input line number
        line: usize,
        /// Bytes declared by the record
        needed: usize,
        /// Staging buffer capacity
        capacity: usize,
    },

    /// Run parameters out of range
    #[cfg_attr(feature = "std", error("invalid configuration: {0}"))]
    InvalidConfig(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}
