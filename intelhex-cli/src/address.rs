//! Load address parsing
//!
//! Addresses are digits with an optional radix suffix: `H` for hex, `O` or `Q`
//! for octal, `B` for binary, `D` or nothing for decimal. Suffixes are case
//! insensitive, so `1000h`, `7777q`, `1010b` and `4096` are all accepted.

/// Parse a 16-bit load address
pub fn parse_address(text: &str) -> Result<u16, String> {
    let invalid = || format!("invalid address: {:?}", text);

    // Hex digits run up to the first character that cannot be one; `B` and `D`
    // are hex digits themselves, so they are only recognised at the very end.
    let digits_end = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(text.len());
    let (digits, tag) = text.split_at(digits_end);

    let (digits, radix) = match tag.to_ascii_uppercase().as_str() {
        "H" => (digits, 16),
        "O" | "Q" => (digits, 8),
        "" => match digits.chars().last().map(|c| c.to_ascii_uppercase()) {
            Some('B') => (&digits[..digits.len() - 1], 2),
            Some('D') => (&digits[..digits.len() - 1], 10),
            _ => (digits, 10),
        },
        _ => return Err(invalid()),
    };

    if digits.is_empty() {
        return Err(invalid());
    }

    let mut value: u32 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(16).filter(|d| *d < radix).ok_or_else(invalid)?;
        value = value * radix + digit;
        if value > u16::MAX as u32 {
            return Err(invalid());
        }
    }

    Ok(value as u16)
}
