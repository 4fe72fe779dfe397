//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a menu price
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("${price:.2}")
    } else {
        "N/A".to_string()
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) color
pub fn parse_hex_color(input: &str) -> Result<[u8; 3], String> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected #rrggbb, got '{input}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("invalid color '{input}': {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(95.0), "$95.00");
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(f64::NAN), "N/A");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1a0a05"), Ok([0x1a, 0x0a, 0x05]));
        assert_eq!(parse_hex_color("FFFFFF"), Ok([255, 255, 255]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ñ0000").is_err());
    }
}
