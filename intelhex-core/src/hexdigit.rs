//! ASCII hex digit codec
//!
//! Decoding is lenient: a character that is not a hex digit reads as zero.
//! Garbage is rejected one layer up, when the record checksum fails to add up.

/// Convert a single ASCII hex character to its 4-bit value
pub const fn nibble(ch: u8) -> u8 {
    match ch {
        b'0'..=b'9' => ch - b'0',
        b'a'..=b'f' => ch - b'a' + 10,
        b'A'..=b'F' => ch - b'A' + 10,
        _ => 0,
    }
}

/// Read `count` hex characters starting at `pos`, most significant nibble first.
/// Characters past the end of `line` read as zero.
fn read_nibbles(line: &[u8], pos: usize, count: usize) -> u32 {
    (0..count).fold(0u32, |acc, i| {
        let ch = line.get(pos + i).copied().unwrap_or(b'0');
        (acc << 4) | nibble(ch) as u32
    })
}

/// Read two hex characters as a byte
pub fn read_u8(line: &[u8], pos: usize) -> u8 {
    read_nibbles(line, pos, 2) as u8
}

/// Read four hex characters as a 16-bit word
pub fn read_u16(line: &[u8], pos: usize) -> u16 {
    read_nibbles(line, pos, 4) as u16
}

/// Read eight hex characters as a 32-bit word
pub fn read_u32(line: &[u8], pos: usize) -> u32 {
    read_nibbles(line, pos, 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_digits_and_letters() {
        assert_eq!(nibble(b'0'), 0);
        assert_eq!(nibble(b'9'), 9);
        assert_eq!(nibble(b'A'), 10);
        assert_eq!(nibble(b'f'), 15);
        assert_eq!(nibble(b'F'), 15);
    }

    #[test]
    fn test_nibble_invalid_is_zero() {
        assert_eq!(nibble(b'G'), 0);
        assert_eq!(nibble(b'g'), 0);
        assert_eq!(nibble(b':'), 0);
        assert_eq!(nibble(b'\n'), 0);
    }

    #[test]
    fn test_read_widths() {
        let line = b":12345678";
        assert_eq!(read_u8(line, 1), 0x12);
        assert_eq!(read_u16(line, 1), 0x1234);
        assert_eq!(read_u32(line, 1), 0x1234_5678);
    }

    #[test]
    fn test_read_mixed_case() {
        assert_eq!(read_u16(b"aBcD", 0), 0xABCD);
        assert_eq!(read_u8(b"fF", 0), 0xFF);
    }

    #[test]
    fn test_read_past_end() {
        assert_eq!(read_u8(b"A", 0), 0xA0);
        assert_eq!(read_u16(b"", 0), 0);
    }
}
