//! Property-based tests using proptest

use intelhex_core::{
    constants::MAX_WARNINGS,
    converter::{bin_to_hex, ConvertConfig},
    decoder::decode_line,
    encoder::encode_data,
    reconstructor::{reconstruct_str, Diagnostic, ReconstructConfig},
    DecodeError,
};
use proptest::prelude::*;
use std::io::Cursor;

fn convert(data: &[u8], start_address: u16, bytes_per_record: usize) -> String {
    let config = ConvertConfig {
        start_address,
        bytes_per_record,
    };
    let mut out = Vec::new();
    bin_to_hex(&mut Cursor::new(data), &mut out, &config).unwrap();
    String::from_utf8(out).unwrap()
}

fn hex_digit(value: u8) -> u8 {
    b"0123456789ABCDEF"[value as usize]
}

proptest! {
    #[test]
    fn prop_round_trip_bin_hex_bin(
        (start, data) in (0u16..=0xFFFF).prop_flat_map(|start| {
            let room = 0x1_0000 - start as usize;
            (Just(start), prop::collection::vec(any::<u8>(), 1..room.min(2048) + 1))
        }),
        bytes_per_record in 1usize..=255
    ) {
        let text = convert(&data, start, bytes_per_record);
        let result = reconstruct_str(&text, &ReconstructConfig::default()).unwrap();

        prop_assert_eq!(result.start_address, Some(start));
        prop_assert_eq!(result.data, data);
        prop_assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn prop_single_digit_change_is_rejected(
        offset in any::<u16>(),
        data in prop::collection::vec(any::<u8>(), 1..=255),
        pick in any::<prop::sample::Index>(),
        delta in 1u8..16
    ) {
        let line = encode_data(offset, &data);
        // every character between the mark and the newline is a hex digit
        let pos = 1 + pick.index(line.len() - 2);

        let mut damaged = line.into_bytes();
        let old = intelhex_core::hexdigit::nibble(damaged[pos]);
        damaged[pos] = hex_digit((old + delta) % 16);

        prop_assert!(matches!(
            decode_line(&damaged),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..1024)
    ) {
        // Should never panic, even on random data
        let result = decode_line(&data);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_decode_never_panics_on_marked_lines(
        body in "[0-9A-Fa-f]{0,80}",
        terminator in prop::sample::select(vec!["", "\n", "\r\n", "\r"])
    ) {
        let line = format!(":{}{}", body, terminator);
        let _ = decode_line(line.as_bytes());
    }

    #[test]
    fn prop_short_lines_are_invalid(body in "[0-9A-F]{0,9}") {
        let line = format!(":{}", body);
        prop_assert!(matches!(
            decode_line(line.as_bytes()),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn prop_unmarked_lines_are_not_records(line in "[^:].*") {
        prop_assert_eq!(decode_line(line.as_bytes()), Err(DecodeError::NotARecord));
    }

    #[test]
    fn prop_warning_cap_is_fixed(bad_lines in (MAX_WARNINGS + 1)..200) {
        let text = "garbage\n".repeat(bad_lines);
        let result = reconstruct_str(&text, &ReconstructConfig::default()).unwrap();

        let reported = result
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::InvalidRecord { .. }))
            .count();
        let suppressed = result
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Suppressed { .. }))
            .count();

        prop_assert_eq!(reported, MAX_WARNINGS - 1);
        prop_assert_eq!(suppressed, 1);
        prop_assert_eq!(result.stats.warnings, bad_lines);
        prop_assert!(result.data.is_empty());
    }

    #[test]
    fn prop_reconstruct_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        let text = String::from_utf8_lossy(&data);
        let _ = reconstruct_str(&text, &ReconstructConfig::default());
    }
}
