//! # Error Types
//!
//! Typed errors for the payment code codec.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paycode-core errors (this file)                                       │
//! │  ├── TipError     - TipValue constructed outside its variant's bounds  │
//! │  ├── EncodeError  - Suffix cannot be produced (capacity, bad argument) │
//! │  ├── DecodeError  - Strict decoding of a suffix failed                 │
//! │  ├── ColorError   - Bad `#RRGGBB` text or oversized palette            │
//! │  └── CodecError   - Umbrella wrapping all four                         │
//! │                                                                         │
//! │  paycode-config errors (separate crate)                                │
//! │  └── ConfigError  - Config file / environment failures                 │
//! │                                                                         │
//! │  Flow: TipError ──┐                                                    │
//! │        EncodeError├──► CodecError ──► ConfigError / anyhow (CLI)       │
//! │        DecodeError┤                                                    │
//! │        ColorError ┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Soft Boundary
//! Scanning a garbled code is NOT an error. `decode_color` and `parse_color`
//! return `COLOR_UNKNOWN` or a default color instead of any type in this
//! file. `DecodeError` only surfaces from the strict `decode` APIs.

use thiserror::Error;

use crate::tip::TipKind;

// =============================================================================
// Tip Error
// =============================================================================

/// Errors raised while constructing a [`TipValue`](crate::tip::TipValue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TipError {
    /// Value is outside the variant's inclusive range.
    ///
    /// ## When This Occurs
    /// - User typed a 2000% tip
    /// - Cash tip above $453.59
    ///
    /// Never clamped: callers reject the input upstream.
    #[error("{kind} tip {value} is out of range (max {max})")]
    ValueOutOfRange { kind: TipKind, value: u32, max: u32 },
}

// =============================================================================
// Encode Error
// =============================================================================

/// Errors raised while producing a preferences suffix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The tip's encoded value needs more digits than the format's tip field.
    ///
    /// Distinct from [`TipError::ValueOutOfRange`]: the tip itself is valid,
    /// the current wire format just has no room for it.
    #[error("encoded tip {encoded} does not fit a {width}-digit field")]
    TipTooLarge { encoded: u32, width: usize },

    /// Programmer error (zero-width field, overflowing fixed field).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// Decode Error
// =============================================================================

/// Errors raised by the strict decoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An encoded tip value is outside `0..=46655`.
    #[error("encoded tip value {0} is out of range")]
    OutOfRange(u32),

    /// Wrong length or missing `LU` sentinel.
    #[error("malformed preferences suffix: {0}")]
    Malformed(String),

    /// Version field parsed, but no shipped version uses it.
    #[error("unknown preferences version {0:?}")]
    UnknownVersion(String),

    /// A field contained something other than base-36 digits.
    #[error("invalid base-36 digits in {field} field")]
    InvalidDigit { field: &'static str },

    /// Legacy tip-type digit other than `0` (percentage).
    #[error("unsupported legacy tip type {0:?}")]
    UnsupportedTipType(char),
}

// =============================================================================
// Color Error
// =============================================================================

/// Errors raised while building colors and palettes from host settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Text is not a `#RRGGBB` (or bare `RRGGBB`) hex color.
    #[error("color must look like #RRGGBB, got {0:?}")]
    InvalidHex(String),

    /// More entries than a single base-36 digit can index.
    #[error("palette has {len} colors, at most {max} are addressable")]
    PaletteTooLarge { len: usize, max: usize },
}

// =============================================================================
// Codec Error
// =============================================================================

/// Umbrella error for callers that mix construction, encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Tip error: {0}")]
    Tip(#[from] TipError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CodecError.
pub type CodecResult<T> = Result<T, CodecError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TipError::ValueOutOfRange {
            kind: TipKind::Percentage,
            value: 1296,
            max: 1295,
        };
        assert_eq!(
            err.to_string(),
            "percentage tip 1296 is out of range (max 1295)"
        );

        let err = EncodeError::TipTooLarge {
            encoded: 46656,
            width: 3,
        };
        assert_eq!(
            err.to_string(),
            "encoded tip 46656 does not fit a 3-digit field"
        );
    }

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::InvalidDigit { field: "color" };
        assert_eq!(err.to_string(), "invalid base-36 digits in color field");

        let err = DecodeError::UnknownVersion("09".to_string());
        assert_eq!(err.to_string(), "unknown preferences version \"09\"");
    }

    #[test]
    fn test_errors_convert_to_codec_error() {
        let err: CodecError = DecodeError::OutOfRange(50_000).into();
        assert!(matches!(err, CodecError::Decode(DecodeError::OutOfRange(50_000))));

        let err: CodecError = EncodeError::InvalidArgument("width".into()).into();
        assert!(matches!(err, CodecError::Encode(_)));

        let err: CodecError = ColorError::InvalidHex("#12".into()).into();
        assert_eq!(
            err.to_string(),
            "Color error: color must look like #RRGGBB, got \"#12\""
        );
    }
}
