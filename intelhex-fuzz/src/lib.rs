//! Fuzz entry points for intelhex-core
//!
//! Each function takes arbitrary bytes and must never panic. They can be
//! driven from a cargo-fuzz target or any other harness.

use intelhex_core::converter::{bin_to_hex, ConvertConfig};
use intelhex_core::decoder::decode_line;
use intelhex_core::reconstructor::{hex_to_bin, reconstruct_str, ReconstructConfig};
use std::io::Cursor;

pub fn fuzz_decode(data: &[u8]) {
    // Try to decode - should never panic
    let _ = decode_line(data);
}

pub fn fuzz_reconstruct(data: &[u8]) {
    let config = ReconstructConfig::default();

    let text = String::from_utf8_lossy(data);
    let _ = reconstruct_str(&text, &config);

    let mut out = Vec::new();
    let _ = hex_to_bin(&mut Cursor::new(data), &mut out, &config);
}

/// Encode `data` and rebuild it; the image must come back unchanged
pub fn fuzz_round_trip(data: &[u8]) {
    if data.is_empty() || data.len() > 0x10000 {
        return;
    }

    let mut hex = Vec::new();
    if bin_to_hex(&mut Cursor::new(data), &mut hex, &ConvertConfig::default()).is_err() {
        return;
    }

    let mut out = Vec::new();
    let result = hex_to_bin(&mut Cursor::new(hex), &mut out, &ReconstructConfig::default());
    assert!(matches!(result, Ok(ref r) if r.diagnostics.is_empty()));
    assert_eq!(out, data);
}
