//! Integration tests for the complete bin → hex → damage → bin flow

use intelhex_core::{
    converter::{bin_to_hex, ConvertConfig},
    decoder::RecordLines,
    reconstructor::{hex_to_bin, Diagnostic, ReconstructConfig},
    ConvertError, Record, RecordType,
};
use std::io::{self, BufRead, Cursor, Read};

fn to_hex(data: &[u8], config: ConvertConfig) -> String {
    let mut out = Vec::new();
    bin_to_hex(&mut Cursor::new(data), &mut out, &config).unwrap();
    String::from_utf8(out).unwrap()
}

fn to_bin(text: &str) -> (Vec<u8>, intelhex_core::reconstructor::Reconstruction) {
    let mut out = Vec::new();
    let result = hex_to_bin(
        &mut Cursor::new(text.as_bytes()),
        &mut out,
        &ReconstructConfig::default(),
    )
    .unwrap();
    (out, result)
}

#[test]
fn test_full_workflow_clean() {
    // Step 1: Convert a binary image into records
    let image: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let text = to_hex(
        &image,
        ConvertConfig {
            start_address: 0x0400,
            ..Default::default()
        },
    );

    // Step 2: Every line decodes as a valid record
    let records: Vec<Record> = RecordLines::new(&text)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 1 + 32 + 1);
    assert_eq!(
        records.first().map(Record::record_type),
        Some(RecordType::ExtendedLinearAddress)
    );
    assert!(records.last().unwrap().is_end_of_file());

    // Step 3: Rebuild the image
    let (out, result) = to_bin(&text);
    assert_eq!(out, image);
    assert_eq!(result.start_address, Some(0x0400));
    assert_eq!(result.stats.data_records, 32);
    assert_eq!(result.stats.bytes_loaded, 1000);
}

#[test]
fn test_workflow_with_corrupted_lines() {
    let image = vec![0x5Au8; 96];
    let text = to_hex(&image, ConvertConfig::default());

    // Corrupt the second data record's first data digit
    let mut lines: Vec<String> = text.lines().map(|l| format!("{}\n", l)).collect();
    lines[2].replace_range(9..10, "F");
    let damaged: String = lines.concat();

    let (out, result) = to_bin(&damaged);

    // The gap left by the rejected record is zero filled
    assert_eq!(out.len(), 96);
    assert_eq!(&out[..32], &image[..32]);
    assert!(out[32..64].iter().all(|&b| b == 0));
    assert_eq!(&out[64..], &image[64..]);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::InvalidRecord {
            line: 3,
            error: intelhex_core::DecodeError::InvalidFormat(
                intelhex_core::FormatError::BadChecksum(0xA0)
            ),
        }]
    );
}

#[test]
fn test_workflow_crlf_and_blank_lines() {
    let text = to_hex(b"windows line endings", ConvertConfig::default());
    let crlf = text.replace('\n', "\r\n\r\n");

    let (out, result) = to_bin(&crlf);
    assert_eq!(out, b"windows line endings");
    // blank line after the address record and after the data record
    assert_eq!(result.stats.warnings, 2);
}

#[test]
fn test_workflow_missing_end_of_file() {
    let text = to_hex(b"no terminator", ConvertConfig::default());
    let truncated = text.trim_end_matches(":00000001FF\n");

    let (out, result) = to_bin(truncated);
    assert_eq!(out, b"no terminator");
    assert!(!result.stats.end_of_file_seen);
}

#[test]
fn test_workflow_only_end_of_file() {
    let (out, result) = to_bin(":00000001FF\n");
    assert!(out.is_empty());
    assert_eq!(result.start_address, None);
}

#[test]
fn test_workflow_full_address_space() {
    let image: Vec<u8> = (0..0x1_0000u32).map(|i| (i >> 8) as u8 ^ i as u8).collect();
    let text = to_hex(&image, ConvertConfig::default());

    let (out, result) = to_bin(&text);
    assert_eq!(out.len(), 0x1_0000);
    assert_eq!(out, image);
    assert_eq!(result.stats.bytes_dropped, 0);
}

#[test]
fn test_workflow_wrapped_offsets_overlay_low_memory() {
    // 32 bytes starting 16 below the top: the second half wraps to address 0
    let image: Vec<u8> = (1..=32).collect();
    let text = to_hex(
        &image,
        ConvertConfig {
            start_address: 0xFFF0,
            bytes_per_record: 16,
        },
    );

    let (out, result) = to_bin(&text);
    assert_eq!(result.start_address, Some(0));
    assert_eq!(out.len(), 0x1_0000);
    assert_eq!(&out[..16], &image[16..]);
    assert_eq!(&out[0xFFF0..], &image[..16]);
}

/// Line source failing after the first line
struct BrokenSource {
    first: Option<&'static [u8]>,
}

impl Read for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        unreachable!("read through BufRead only")
    }
}

impl BufRead for BrokenSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self.first {
            Some(line) => Ok(line),
            None => Err(io::Error::new(io::ErrorKind::Other, "device gone")),
        }
    }

    fn consume(&mut self, amt: usize) {
        if let Some(line) = self.first {
            let rest = &line[amt..];
            self.first = if rest.is_empty() { None } else { Some(rest) };
        }
    }
}

#[test]
fn test_read_failure_aborts_without_output() {
    let mut source = BrokenSource {
        first: Some(b":0100000042BD\n"),
    };
    let mut out = Vec::new();
    let result = hex_to_bin(&mut source, &mut out, &ReconstructConfig::default());

    assert_eq!(result.unwrap_err(), ConvertError::Io("device gone".to_string()));
    assert!(out.is_empty());
}
