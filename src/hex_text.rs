//! Hex text persistence for byte buffers
//!
//! Encoded buffers are shown and stored as upper-case hex without separators.
//! When reading, whitespace is ignored and a dangling final digit is completed
//! with `0`, so `"ABC"` reads as `[0xAB, 0xC0]`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexTextError {
    #[error("Invalid hex text: {0}")]
    Invalid(#[from] hex::FromHexError),
}

/// Render bytes as upper-case hex
pub fn encode_hex_text(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Parse hex text into bytes
pub fn decode_hex_text(text: &str) -> Result<Vec<u8>, HexTextError> {
    let mut digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 == 1 {
        digits.push('0');
    }
    Ok(hex::decode(digits)?)
}
