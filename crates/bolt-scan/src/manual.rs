//! # Manual Entry
//!
//! The typed-barcode input path: the cashier types into the entry field and
//! commits with Enter. The only validation is fail-fast on blank input; the
//! server decides whether the barcode matches anything.

use crate::error::{ScanError, ScanResult};

/// Reads a committed manual entry into a barcode string.
///
/// Trims surrounding whitespace and fails with `EmptyInput` when nothing
/// remains, before any lookup is issued.
pub fn parse_manual_entry(raw: &str) -> ScanResult<String> {
    let barcode = raw.trim();
    if barcode.is_empty() {
        return Err(ScanError::EmptyInput);
    }
    Ok(barcode.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(parse_manual_entry("  8901030  ").unwrap(), "8901030");
    }

    #[test]
    fn test_blank_input_fails_fast() {
        assert_eq!(parse_manual_entry("").unwrap_err(), ScanError::EmptyInput);
        assert_eq!(parse_manual_entry("   ").unwrap_err(), ScanError::EmptyInput);
        assert_eq!(parse_manual_entry("\t\n").unwrap_err(), ScanError::EmptyInput);
    }

    #[test]
    fn test_inner_content_is_preserved() {
        // No format validation here: the server owns barcode matching
        assert_eq!(parse_manual_entry("ABC-123").unwrap(), "ABC-123");
    }
}
