//! Record decoding (strict mode)

use crate::checksum;
use crate::constants::{
    RecordType, DATA_START, HEADER_LEN, MIN_RECORD_CHARS, RECORD_MARK, STAGING_CAPACITY,
};
use crate::error::{DecodeError, FormatError};
use crate::hexdigit::{read_u16, read_u8};
use crate::types::Record;
use alloc::vec::Vec;
use bytes::Bytes;
use core::iter::FusedIterator;

/// Decode one record line
///
/// `line` is the raw line including its terminator (`\n` or `\r\n`).
/// `capacity` is the size of the caller's staging buffer for data records.
///
/// Validation runs in a fixed order:
/// - Record mark
/// - Minimum length
/// - Declared length against the line length
/// - Line terminator right after the checksum
/// - Checksum
/// - Record type specific shape
pub fn decode_record(line: &[u8], capacity: usize) -> Result<Record, DecodeError> {
    if line.first() != Some(&RECORD_MARK) {
        return Err(DecodeError::NotARecord);
    }

    if line.len() < MIN_RECORD_CHARS {
        return Err(FormatError::TooShort(line.len()).into());
    }

    let reclen = read_u8(line, 1);
    let offset = read_u16(line, 3);
    let rectype = read_u8(line, 7);

    // mark, header, data, checksum, terminator
    let expected = 1 + 2 * HEADER_LEN + 2 * reclen as usize + 2 + 1;
    if line.len() < expected {
        return Err(FormatError::Truncated {
            expected,
            actual: line.len(),
        }
        .into());
    }

    if !matches!(line[expected - 1], b'\n' | b'\r') {
        return Err(FormatError::MissingTerminator.into());
    }

    let raw: Vec<u8> = (0..reclen as usize + HEADER_LEN + 1)
        .map(|i| read_u8(line, 1 + 2 * i))
        .collect();
    if !checksum::is_valid(&raw) {
        return Err(FormatError::BadChecksum(checksum::sum(&raw)).into());
    }

    let kind = RecordType::try_from(rectype).map_err(FormatError::UnknownType)?;

    match kind {
        RecordType::Data => {
            if capacity < reclen as usize {
                return Err(DecodeError::BufferTooSmall {
                    needed: reclen as usize,
                    capacity,
                });
            }

            let data = &raw[HEADER_LEN..HEADER_LEN + reclen as usize];
            Ok(Record::Data {
                offset,
                bytes: Bytes::copy_from_slice(data),
            })
        }
        RecordType::EndOfFile => {
            if reclen != 0 {
                return Err(FormatError::BadEndOfFile(reclen).into());
            }
            Ok(Record::EndOfFile { start: offset })
        }
        RecordType::ExtendedLinearAddress => {
            check_address_shape(kind, reclen, offset)?;
            Ok(Record::ExtendedLinearAddress {
                value: read_u16(line, DATA_START),
            })
        }
        RecordType::ExtendedSegmentAddress
        | RecordType::StartSegmentAddress
        | RecordType::StartLinearAddress => {
            check_address_shape(kind, reclen, offset)?;
            Ok(Record::Ignorable(kind))
        }
    }
}

/// Address records must carry their fixed payload length at offset zero
fn check_address_shape(kind: RecordType, reclen: u8, offset: u16) -> Result<(), DecodeError> {
    if kind.fixed_len() != Some(reclen) || offset != 0 {
        return Err(DecodeError::NotARecord);
    }
    Ok(())
}

/// Decode a line using the default staging capacity
pub fn decode_line<T: AsRef<[u8]>>(line: T) -> Result<Record, DecodeError> {
    decode_record(line.as_ref(), STAGING_CAPACITY)
}

/// Iterator decoding every line of an in-memory text, terminators included
pub struct RecordLines<'a> {
    inner: core::str::SplitInclusive<'a, char>,
}

impl<'a> RecordLines<'a> {
    /// Iterate over the lines of `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_inclusive('\n'),
        }
    }
}

impl<'a> Iterator for RecordLines<'a> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(decode_line)
    }
}

impl<'a> FusedIterator for RecordLines<'a> {}
