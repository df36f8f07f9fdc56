//! Hexadecimal helpers for byte-array command arguments.

use anyhow::{Result, bail};

/// Encodes bytes as an uppercase hexadecimal string without separators.
pub fn to_hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{:02X}", byte));
    }
    out
}

/// Decodes a hexadecimal string into bytes, high nibble first.
///
/// An odd-length input is zero-extended on the left, so `"FFF"` decodes as
/// `"0FFF"`. Fails on any non-hexadecimal character.
pub fn from_hex_string(hex: &str) -> Result<Vec<u8>> {
    let padded;
    let hex = if hex.len() % 2 != 0 {
        padded = format!("0{}", hex);
        &padded
    } else {
        hex
    };

    let digits = hex.as_bytes();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let high = hex_digit(pair[0])?;
        let low = hex_digit(pair[1])?;
        bytes.push(high << 4 | low);
    }
    Ok(bytes)
}

fn hex_digit(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => bail!("not a hexadecimal digit: {:?}", other as char),
    }
}
