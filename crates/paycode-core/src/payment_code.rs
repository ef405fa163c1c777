//! # Payment Code
//!
//! The full scanned string: an opaque payment token followed by an optional
//! preferences suffix.
//!
//! ## Scan Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scanner reads "4F7A9C21E0B3030027LU"                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_color(table, code) ← THIS MODULE                                │
//! │       │                                                                 │
//! │       ├── empty code?        → table.default_color()                   │
//! │       ├── no LU suffix?      → table.default_color()                   │
//! │       ├── index not in table → table.default_color()                   │
//! │       │                                                                 │
//! │       └── index 7 → table.resolve(7) → card background color           │
//! │                                                                         │
//! │  The token prefix is never inspected. The suffix is found from the     │
//! │  end of the string by its fixed width and sentinel alone.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::color::{Color, ColorIndex, ColorTable, COLOR_UNKNOWN};
use crate::error::{DecodeError, EncodeError};
use crate::preferences::{self, Preferences, LAYOUTS, SENTINEL};
use crate::tip::TipValue;

/// Outer code versions. This family has only ever shipped one, so every
/// non-empty code classifies as [`CodeVersion::V1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeVersion {
    V1,
}

/// Classifies a full payment code.
pub fn code_version(_code: &str) -> CodeVersion {
    CodeVersion::V1
}

/// Resolves the display color for a scanned code. Never fails.
///
/// ## Example
/// ```rust
/// use paycode_core::color::{Color, ColorTable, Palette};
/// use paycode_core::payment_code::parse_color;
///
/// let palette = Palette::new(vec![Color::rgb(255, 0, 0)], Color::rgb(0, 0, 0)).unwrap();
///
/// assert_eq!(parse_color(&palette, "TOKEN030020LU"), Color::rgb(255, 0, 0));
/// assert_eq!(parse_color(&palette, "TOKEN"), palette.default_color());
/// assert_eq!(parse_color(&palette, ""), palette.default_color());
/// ```
pub fn parse_color<T: ColorTable + ?Sized>(color_table: &T, code: &str) -> Color {
    if code.is_empty() {
        return color_table.default_color();
    }

    let index = match code_version(code) {
        CodeVersion::V1 => preferences::decode_color(code),
    };

    resolve_index(color_table, index).unwrap_or_else(|| {
        debug!(index, "Falling back to default color");
        color_table.default_color()
    })
}

fn resolve_index<T: ColorTable + ?Sized>(color_table: &T, index: ColorIndex) -> Option<Color> {
    if index == COLOR_UNKNOWN {
        return None;
    }
    u32::try_from(index).ok().and_then(|i| color_table.resolve(i))
}

/// Appends a current-version preferences suffix to `data`.
///
/// Empty `data` comes back unchanged: there is no token to decorate.
///
/// ## Example
/// ```rust
/// use paycode_core::payment_code::encode_code;
/// use paycode_core::tip::TipValue;
///
/// let tip = TipValue::percentage(2).unwrap();
/// assert_eq!(encode_code("4F7A9C", 7, &tip).unwrap(), "4F7A9C030027LU");
/// assert_eq!(encode_code("", 7, &tip).unwrap(), "");
/// ```
pub fn encode_code(
    data: &str,
    color_index: ColorIndex,
    tip: &TipValue,
) -> Result<String, EncodeError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let suffix = preferences::encode(color_index, tip)?;
    Ok(format!("{data}{suffix}"))
}

/// Splits a code into its token and a suffix-shaped tail.
///
/// The tail is returned when the code is long enough for a suffix and ends
/// with the sentinel; it is not otherwise validated. Codes without one come
/// back whole as the token.
pub fn split_code(code: &str) -> (&str, Option<&str>) {
    let suffix_len = LAYOUTS[0].total_len();
    if code.len() < suffix_len || !code.ends_with(SENTINEL) {
        return (code, None);
    }

    let split = code.len() - suffix_len;
    match (code.get(..split), code.get(split..)) {
        (Some(token), Some(suffix)) => (token, Some(suffix)),
        _ => (code, None),
    }
}

/// Strictly decodes the preferences carried by a full code.
pub fn parse_preferences(code: &str) -> Result<Preferences, DecodeError> {
    match split_code(code) {
        (_, Some(suffix)) => preferences::decode(suffix),
        (_, None) => Err(DecodeError::Malformed(format!(
            "code does not end in a {SENTINEL}-terminated suffix"
        ))),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
