//! Hexadecimal helpers used when rendering targets and parsing
//! configuration documents.

use std::fmt::Write;

/// Convert a byte slice to an uppercase hex string without separators, the
/// form used when a target is printed.
///
/// Example: `&[0x00, 0x0c]` -> `"000C"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Render an optional buffer for log output: lowercase hex, or `None` when
/// the buffer is absent.
pub fn print_data(data: Option<&[u8]>) -> String {
    match data {
        Some(bytes) => bytes_to_hex(bytes).to_ascii_lowercase(),
        None => "None".to_string(),
    }
}

/// Parse a hex string into bytes.
///
/// ASCII whitespace between digits is ignored so fixtures such as
/// `"1148 B2565400"` can be written grouped.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(format!("hex string {:?} has odd length", s));
    }

    cleaned
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|e| format!("invalid hex pair '{}': {}", text, e))
        })
        .collect()
}
