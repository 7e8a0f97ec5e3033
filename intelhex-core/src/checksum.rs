//! Intel HEX checksum: the two's complement of the 8-bit byte sum

/// Wrapping 8-bit sum of `bytes`
pub fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}

/// Checksum appended to a record: `(256 - sum % 256) % 256`
pub fn checksum(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(sum(bytes))
}

/// A record including its checksum byte is valid when its bytes sum to zero
pub fn is_valid(bytes_with_checksum: &[u8]) -> bool {
    sum(bytes_with_checksum) == 0
}
