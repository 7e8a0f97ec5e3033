//! Decoded record types

use crate::constants::RecordType;
use bytes::Bytes;

/// 16-bit load address
pub type Address = u16;

/// A successfully decoded Intel HEX record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Data to be loaded at `offset`
    Data {
        /// Load offset
        offset: Address,
        /// Data bytes (0 to 255)
        bytes: Bytes,
    },

    /// End of file, carrying the start address from its offset field
    EndOfFile {
        /// Start address
        start: Address,
    },

    /// Upper linear base address.
    ///
    /// Parsed, but never applied to load offsets: addressing stays 16-bit.
    ExtendedLinearAddress {
        /// Upper 16 bits of the linear address
        value: Address,
    },

    /// A structurally valid record whose payload is discarded
    /// (extended segment, start segment or start linear address)
    Ignorable(RecordType),
}

impl Record {
    /// The record type this record was decoded from
    pub fn record_type(&self) -> RecordType {
        match self {
            Record::Data { .. } => RecordType::Data,
            Record::EndOfFile { .. } => RecordType::EndOfFile,
            Record::ExtendedLinearAddress { .. } => RecordType::ExtendedLinearAddress,
            Record::Ignorable(kind) => *kind,
        }
    }

    /// Check if this record terminates the stream
    pub fn is_end_of_file(&self) -> bool {
        matches!(self, Record::EndOfFile { .. })
    }

    /// Number of data bytes carried, zero for non-data records
    pub fn data_len(&self) -> usize {
        match self {
            Record::Data { bytes, .. } => bytes.len(),
            _ => 0,
        }
    }
}
