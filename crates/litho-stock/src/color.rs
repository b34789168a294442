//! Hex color parsing for ink, paper, and duotone colors.

use crate::{StockError, StockResult};

/// Parses a `#rrggbb` string into an `[r, g, b]` byte triplet.
///
/// The leading `#` is optional. Accepts both upper and lower case hex
/// digits.
///
/// # Example
///
/// ```rust
/// use litho_stock::parse_hex_rgb;
///
/// assert_eq!(parse_hex_rgb("#f0ead8").unwrap(), [0xf0, 0xea, 0xd8]);
/// assert_eq!(parse_hex_rgb("100c08").unwrap(), [0x10, 0x0c, 0x08]);
/// ```
pub fn parse_hex_rgb(s: &str) -> StockResult<[u8; 3]> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return Err(StockError::InvalidColor(
            s.to_string(),
            "expected 6 hex digits".into(),
        ));
    }
    let byte = |i: usize| -> StockResult<u8> {
        u8::from_str_radix(&s[i..i + 2], 16)
            .map_err(|e| StockError::InvalidColor(s.to_string(), e.to_string()))
    };
    Ok([byte(0)?, byte(2)?, byte(4)?])
}

/// Standard offset-press ink colors used by the cmyk halftone mode.
pub mod ink {
    /// Cyan ink, `#009fce`.
    pub const CYAN: [u8; 3] = [0x00, 0x9f, 0xce];
    /// Magenta ink, `#d4006a`.
    pub const MAGENTA: [u8; 3] = [0xd4, 0x00, 0x6a];
    /// Yellow ink, `#f5d800`.
    pub const YELLOW: [u8; 3] = [0xf5, 0xd8, 0x00];
    /// Black ink, `#100c08`.
    pub const BLACK: [u8; 3] = [0x10, 0x0c, 0x08];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_rgb("#ffffff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_rgb("ffffff").unwrap(), [255, 255, 255]);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_hex_rgb("#fff").is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(parse_hex_rgb("#zzzzzz").is_err());
    }

    #[test]
    fn standard_inks_match_spec_constants() {
        assert_eq!(parse_hex_rgb("#009fce").unwrap(), ink::CYAN);
        assert_eq!(parse_hex_rgb("#100c08").unwrap(), ink::BLACK);
    }
}
