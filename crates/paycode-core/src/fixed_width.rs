//! # Fixed-Width Base-36 Fields
//!
//! Stateless helpers for the zero-padded base-36 fields that make up a
//! preferences suffix.
//!
//! ## Field Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "030027LU"                                                             │
//! │   ││││││└┴── sentinel                                                   │
//! │   │││││└──── color  (1 digit)                                          │
//! │   ││└┴┴───── tip    (3 digits, zero-padded)                            │
//! │   └┴──────── version (2 digits, zero-padded)                           │
//! │                                                                         │
//! │  Every field is base-36: 0-9 then A-Z. One digit holds 0..=35,         │
//! │  two digits hold 0..=1295, three digits hold 0..=46655.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::EncodeError;

/// Radix used by every field of the format.
pub const RADIX: u32 = 36;

/// Renders `value` in uppercase base-36 with no padding.
///
/// ## Example
/// ```rust
/// use paycode_core::fixed_width::to_base36;
///
/// assert_eq!(to_base36(0), "0");
/// assert_eq!(to_base36(35), "Z");
/// assert_eq!(to_base36(46655), "ZZZ");
/// ```
pub fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        // from_digit only fails for digit >= radix, which `%` rules out
        if let Some(c) = char::from_digit(value % RADIX, RADIX) {
            digits.push(c.to_ascii_uppercase());
        }
        value /= RADIX;
    }

    digits.iter().rev().collect()
}

/// Parses a base-36 field.
///
/// Stricter than `u32::from_str_radix`: a leading `+` or any character that
/// is not an ASCII letter or digit is rejected, as is the empty string.
pub fn parse_base36(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    u32::from_str_radix(digits, RADIX).ok()
}

/// Checks that `code` has exactly `expected_length` bytes and that the
/// base-36 number in `code[version_start..version_end]` equals
/// `expected_version`.
///
/// Unparseable or out-of-bounds version ranges yield `false`.
///
/// ## Example
/// ```rust
/// use paycode_core::fixed_width::is_valid_code;
///
/// assert!(is_valid_code("030027LU", 8, 0, 2, 3));
/// assert!(!is_valid_code("030027LU", 8, 0, 2, 2));
/// assert!(!is_valid_code("0300LU", 8, 0, 2, 3));
/// ```
pub fn is_valid_code(
    code: &str,
    expected_length: usize,
    version_start: usize,
    version_end: usize,
    expected_version: u32,
) -> bool {
    if code.len() != expected_length {
        return false;
    }

    code.get(version_start..version_end)
        .and_then(parse_base36)
        .map_or(false, |version| version == expected_version)
}

/// Left-pads `value` with `'0'` up to `final_size` characters.
///
/// `None` pads the empty string. Values already at least `final_size` long
/// come back unchanged, never truncated.
///
/// ## Example
/// ```rust
/// use paycode_core::fixed_width::left_pad_with_zeros;
///
/// assert_eq!(left_pad_with_zeros(Some("7"), 3), "007");
/// assert_eq!(left_pad_with_zeros(None, 2), "00");
/// assert_eq!(left_pad_with_zeros(Some("1234"), 2), "1234");
/// ```
pub fn left_pad_with_zeros(value: Option<&str>, final_size: usize) -> String {
    let value = value.unwrap_or_default();
    format!("{value:0>final_size$}")
}

/// Renders `value` as exactly `width` zero-padded base-36 digits.
///
/// Meant for fields whose content is fixed by the format (the version
/// field), so both failure modes are programmer errors.
///
/// ## Errors
/// - `InvalidArgument` for a zero `width`
/// - `InvalidArgument` if `value` needs more than `width` digits
pub fn encode_field(value: u32, width: usize) -> Result<String, EncodeError> {
    if width == 0 {
        return Err(EncodeError::InvalidArgument(
            "field width must be at least one digit".to_string(),
        ));
    }

    let digits = to_base36(value);
    if digits.len() > width {
        return Err(EncodeError::InvalidArgument(format!(
            "{value} needs {} base-36 digits but the field holds {width}",
            digits.len()
        )));
    }

    Ok(left_pad_with_zeros(Some(&digits), width))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "A");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "ZZ");
        assert_eq!(to_base36(1296), "100");
        assert_eq!(to_base36(46656), "1000");
    }

    #[test]
    fn test_parse_base36() {
        assert_eq!(parse_base36("ZZZ"), Some(46655));
        assert_eq!(parse_base36("03"), Some(3));
        assert_eq!(parse_base36("z"), Some(35));

        assert_eq!(parse_base36(""), None);
        assert_eq!(parse_base36("+1"), None);
        assert_eq!(parse_base36("-1"), None);
        assert_eq!(parse_base36("A B"), None);
        assert_eq!(parse_base36("ZZZZZZZZ"), None); // overflows u32
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("030027LU", 8, 0, 2, 3));
        assert!(is_valid_code("02001ZLU", 8, 0, 2, 2));

        // Wrong length
        assert!(!is_valid_code("030027LUX", 8, 0, 2, 3));
        // Wrong version
        assert!(!is_valid_code("040027LU", 8, 0, 2, 3));
        // Garbage in the version field
        assert!(!is_valid_code("-30027LU", 8, 0, 2, 3));
        // Version range past the end
        assert!(!is_valid_code("030027LU", 8, 7, 10, 3));
        // Range splitting a multi-byte character
        assert!(!is_valid_code("é30027L", 8, 0, 1, 3));
    }

    #[test]
    fn test_left_pad_with_zeros() {
        assert_eq!(left_pad_with_zeros(Some("2"), 3), "002");
        assert_eq!(left_pad_with_zeros(Some(""), 2), "00");
        assert_eq!(left_pad_with_zeros(None, 0), "");
        assert_eq!(left_pad_with_zeros(Some("ABCD"), 3), "ABCD");
    }

    #[test]
    fn test_left_pad_is_idempotent() {
        for input in ["", "1", "ZZ", "ABC", "12345"] {
            for width in input.len()..8 {
                let once = left_pad_with_zeros(Some(input), width);
                let twice = left_pad_with_zeros(Some(&once), width);
                assert_eq!(once, twice, "input {input:?} width {width}");
                assert_eq!(once.len(), width);
            }
        }
    }

    #[test]
    fn test_encode_field() {
        assert_eq!(encode_field(3, 2).unwrap(), "03");
        assert_eq!(encode_field(46655, 3).unwrap(), "ZZZ");

        assert!(matches!(
            encode_field(1, 0),
            Err(EncodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            encode_field(1296, 2),
            Err(EncodeError::InvalidArgument(_))
        ));
    }
}
