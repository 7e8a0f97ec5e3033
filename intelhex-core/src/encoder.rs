//! Record encoding

use crate::checksum::checksum;
use crate::constants::{RecordType, ELA_PAYLOAD_LEN, HEADER_LEN, MAX_RECORD_DATA, RECORD_MARK};
use crate::types::Address;
use alloc::string::String;
use bytes::{BufMut, BytesMut};

/// Encode one record line
///
/// The line is laid out as:
/// 1. Record mark `:`
/// 2. Header: record length (1 byte), load offset (2 bytes, big-endian), record type (1 byte)
/// 3. Payload
/// 4. Checksum over header and payload
///
/// Every byte is written as two uppercase hex characters and the line ends in `\n`.
fn encode_record(record_type: RecordType, offset: Address, payload: &[u8]) -> String {
    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len() + 1);

    buf.put_u8(payload.len() as u8);
    buf.put_u16(offset);
    buf.put_u8(record_type.as_u8());
    buf.put_slice(payload);

    let sum = checksum(&buf);
    buf.put_u8(sum);

    let mut line = String::with_capacity(2 * buf.len() + 2);
    line.push(RECORD_MARK as char);
    line.push_str(&hex::encode_upper(&buf));
    line.push('\n');
    line
}

/// Encode a data record
///
/// # Panics
///
/// Panics unless `0 < bytes.len() < 256`.
pub fn encode_data(offset: Address, bytes: &[u8]) -> String {
    assert!(
        !bytes.is_empty() && bytes.len() <= MAX_RECORD_DATA,
        "data record length {} out of range 1..=255",
        bytes.len()
    );

    encode_record(RecordType::Data, offset, bytes)
}

/// Encode an extended linear address record carrying `ulba`
pub fn encode_extended_linear_address(ulba: Address) -> String {
    let payload = ulba.to_be_bytes();
    debug_assert_eq!(payload.len(), ELA_PAYLOAD_LEN as usize);

    encode_record(RecordType::ExtendedLinearAddress, 0x0000, &payload)
}

/// Encode an end of file record; `start` goes in the offset field
pub fn encode_end_of_file(start: Address) -> String {
    encode_record(RecordType::EndOfFile, start, &[])
}

/// Writes encoded records to a sink, counting what went out
#[cfg(feature = "std")]
pub struct RecordWriter<W: std::io::Write> {
    inner: W,
    records: usize,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> RecordWriter<W> {
    /// Wrap a sink
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    /// Write a data record
    pub fn data(&mut self, offset: Address, bytes: &[u8]) -> std::io::Result<()> {
        self.write_line(&encode_data(offset, bytes))
    }

    /// Write an extended linear address record
    pub fn extended_linear_address(&mut self, ulba: Address) -> std::io::Result<()> {
        self.write_line(&encode_extended_linear_address(ulba))
    }

    /// Write an end of file record
    pub fn end_of_file(&mut self, start: Address) -> std::io::Result<()> {
        self.write_line(&encode_end_of_file(start))
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Flush and return the sink
    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.records += 1;
        Ok(())
    }
}
