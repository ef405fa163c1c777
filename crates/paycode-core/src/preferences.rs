//! # Preferences Codec
//!
//! The versioned, fixed-width suffix carrying a tip and a color index.
//!
//! ## Versions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Preferences Suffix Layouts                           │
//! │                                                                         │
//! │  V3 (current)   [ver ver][tip tip tip][color][L U]        8 chars      │
//! │                  "03"     encoded value  0-Z   sentinel                 │
//! │                                                                         │
//! │  V2 (legacy)    [ver ver][type][tip tip][color][L U]      8 chars      │
//! │                  "02"     "0"   percent  0-Z   sentinel                 │
//! │                                                                         │
//! │  encode()  ──► always V3                                               │
//! │  decode*() ──► V3 first, then V2; every shipped version stays readable │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each version is one row in [`LAYOUTS`]; supporting a new version means
//! adding a row and a [`PreferenceVersion`] variant.
//!
//! ## Lenient Color Decoding
//! [`decode_color`] anchors on the sentinel and reads the digit right before
//! it. The declared version field is NOT checked, so a correctly terminated
//! suffix from an unknown future version still yields a color. Codes printed
//! by older hardware may depend on this, so it stays lenient.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};
use ts_rs::TS;

use crate::color::{ColorIndex, COLOR_UNKNOWN};
use crate::error::{DecodeError, EncodeError};
use crate::fixed_width::{
    encode_field, is_valid_code, left_pad_with_zeros, parse_base36, to_base36,
};
use crate::tip::{Percentage, TipValue};

/// Literal closing every preferences suffix.
pub const SENTINEL: &str = "LU";

/// Width of the leading version field, shared by all versions.
pub const VERSION_WIDTH: usize = 2;

/// Width of the color field, shared by all versions.
pub const COLOR_WIDTH: usize = 1;

/// The only tip-type digit V2 ever shipped (percentage).
const LEGACY_PERCENTAGE_TYPE: char = '0';

// =============================================================================
// Versions
// =============================================================================

/// A preferences format version that has shipped at some point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceVersion {
    /// Type digit + 2-digit percentage.
    V2,
    /// Single 3-digit encoded tip (percentage or cash by sub-range).
    V3,
}

impl PreferenceVersion {
    /// The version produced by [`encode`].
    pub const CURRENT: PreferenceVersion = PreferenceVersion::V3;

    /// Value stored in the version field.
    pub const fn number(&self) -> u32 {
        match self {
            PreferenceVersion::V2 => 2,
            PreferenceVersion::V3 => 3,
        }
    }

    /// Returns this version's row in [`LAYOUTS`].
    pub fn layout(&self) -> &'static VersionLayout {
        match self {
            PreferenceVersion::V3 => &LAYOUTS[0],
            PreferenceVersion::V2 => &LAYOUTS[1],
        }
    }
}

impl Default for PreferenceVersion {
    fn default() -> Self {
        PreferenceVersion::CURRENT
    }
}

impl fmt::Display for PreferenceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Field widths of one version. Offsets are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLayout {
    pub version: PreferenceVersion,
    /// Width of the legacy tip-type digit (0 when the version has none).
    pub tip_type_width: usize,
    pub tip_width: usize,
}

impl VersionLayout {
    const fn new(version: PreferenceVersion, tip_type_width: usize, tip_width: usize) -> Self {
        VersionLayout {
            version,
            tip_type_width,
            tip_width,
        }
    }

    #[inline]
    pub const fn tip_type_start(&self) -> usize {
        VERSION_WIDTH
    }

    #[inline]
    pub const fn tip_start(&self) -> usize {
        self.tip_type_start() + self.tip_type_width
    }

    #[inline]
    pub const fn color_start(&self) -> usize {
        self.tip_start() + self.tip_width
    }

    #[inline]
    pub const fn sentinel_start(&self) -> usize {
        self.color_start() + COLOR_WIDTH
    }

    #[inline]
    pub const fn total_len(&self) -> usize {
        self.sentinel_start() + SENTINEL.len()
    }

    /// True when `code` ends in something shaped like this version's suffix.
    ///
    /// Only the length and sentinel are checked, so `code` may carry any
    /// token prefix in front of the suffix.
    fn frames_tail(&self, code: &str) -> bool {
        code.len() >= self.total_len() && code.ends_with(SENTINEL)
    }

    /// Byte offset of the color digit when the suffix sits at the end of `code`.
    fn tail_color_offset(&self, code: &str) -> usize {
        code.len() - (self.total_len() - self.color_start())
    }
}

/// Every shipped layout, current version first.
pub static LAYOUTS: [VersionLayout; 2] = [
    VersionLayout::new(PreferenceVersion::V3, 0, 3),
    VersionLayout::new(PreferenceVersion::V2, 1, 2),
];

// =============================================================================
// Decoded Preferences
// =============================================================================

/// A fully decoded preferences suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Preferences {
    pub version: PreferenceVersion,
    pub tip: TipValue,
    pub color: ColorIndex,
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a color index and tip into a current-version suffix.
///
/// - Negative `color_index` (callers pass `-1` for "no preference") encodes
///   as `0`.
/// - An index too large for one digit also encodes as `0`. The color is a
///   display hint, so it never blocks printing a code.
///
/// ## Errors
/// `TipTooLarge` if the tip's encoded value needs more digits than the tip
/// field holds.
///
/// ## Example
/// ```rust
/// use paycode_core::preferences::encode;
/// use paycode_core::tip::TipValue;
///
/// let tip = TipValue::percentage(2).unwrap();
/// assert_eq!(encode(7, &tip).unwrap(), "030027LU");
/// assert_eq!(encode(-1, &tip).unwrap(), "030020LU");
/// ```
pub fn encode(color_index: ColorIndex, tip: &TipValue) -> Result<String, EncodeError> {
    encode_with(PreferenceVersion::CURRENT.layout(), color_index, tip)
}

/// Cash tips never fit a legacy 2-digit field, so a legacy layout always
/// carries the percentage type digit.
fn encode_with(
    layout: &VersionLayout,
    color_index: ColorIndex,
    tip: &TipValue,
) -> Result<String, EncodeError> {
    let encoded = tip.encoded_value();
    let tip_digits = to_base36(encoded);
    if tip_digits.len() > layout.tip_width {
        return Err(EncodeError::TipTooLarge {
            encoded,
            width: layout.tip_width,
        });
    }

    let color = color_index.max(0) as u32;
    let mut color_digits = to_base36(color);
    if color_digits.len() > COLOR_WIDTH {
        debug!(color_index, "Color index does not fit one digit, encoding 0");
        color_digits = left_pad_with_zeros(None, COLOR_WIDTH);
    }

    let mut suffix = String::with_capacity(layout.total_len());
    suffix.push_str(&encode_field(layout.version.number(), VERSION_WIDTH)?);
    if layout.tip_type_width > 0 {
        suffix.push(LEGACY_PERCENTAGE_TYPE);
    }
    suffix.push_str(&left_pad_with_zeros(Some(&tip_digits), layout.tip_width));
    suffix.push_str(&color_digits);
    suffix.push_str(SENTINEL);

    Ok(suffix.to_ascii_uppercase())
}

// =============================================================================
// Fail-Soft Decoding
// =============================================================================

/// Reads the color index from a suffix, or from a full code ending in one.
///
/// Never fails: anything unreadable yields [`COLOR_UNKNOWN`]. See the module
/// docs for why the version field is ignored here.
///
/// ## Example
/// ```rust
/// use paycode_core::color::COLOR_UNKNOWN;
/// use paycode_core::preferences::decode_color;
///
/// assert_eq!(decode_color("030012LU"), 2);
/// assert_eq!(decode_color("02001ZLU"), 35);
/// assert_eq!(decode_color("not-LU-terminated"), COLOR_UNKNOWN);
/// ```
pub fn decode_color(prefs: &str) -> ColorIndex {
    let Some(layout) = LAYOUTS.iter().find(|layout| layout.frames_tail(prefs)) else {
        debug!(len = prefs.len(), "No preferences suffix found");
        return COLOR_UNKNOWN;
    };

    let start = layout.tail_color_offset(prefs);
    match prefs.get(start..start + COLOR_WIDTH).and_then(parse_base36) {
        Some(color) => {
            trace!(color, version = %layout.version, "Decoded color index");
            color as ColorIndex
        }
        None => {
            debug!(version = %layout.version, "Color digit is not base-36");
            COLOR_UNKNOWN
        }
    }
}

/// Classifies a bare suffix by exact length and version field.
///
/// Falls back to [`PreferenceVersion::CURRENT`] when nothing matches, so
/// callers always get a version they can decode with.
pub fn get_preference_version(prefs: &str) -> PreferenceVersion {
    LAYOUTS
        .iter()
        .find(|layout| {
            is_valid_code(
                prefs,
                layout.total_len(),
                0,
                VERSION_WIDTH,
                layout.version.number(),
            )
        })
        .map(|layout| layout.version)
        .unwrap_or(PreferenceVersion::CURRENT)
}

// =============================================================================
// Strict Decoding
// =============================================================================

/// Fully decodes a bare suffix: version, tip and color.
///
/// Unlike [`decode_color`] this checks everything: exact length, a known
/// version field, the sentinel, and every digit.
///
/// ## Example
/// ```rust
/// use paycode_core::preferences::{decode, encode, PreferenceVersion};
/// use paycode_core::tip::TipValue;
///
/// let tip = TipValue::cash_cents(500).unwrap();
/// let prefs = decode(&encode(4, &tip).unwrap()).unwrap();
/// assert_eq!(prefs.version, PreferenceVersion::V3);
/// assert_eq!(prefs.tip, tip);
/// assert_eq!(prefs.color, 4);
/// ```
pub fn decode(prefs: &str) -> Result<Preferences, DecodeError> {
    if !prefs.ends_with(SENTINEL) {
        return Err(DecodeError::Malformed(format!(
            "missing {SENTINEL} sentinel"
        )));
    }

    let version_digits = prefs
        .get(0..VERSION_WIDTH)
        .ok_or_else(|| DecodeError::Malformed("too short for a version field".to_string()))?;
    let number =
        parse_base36(version_digits).ok_or(DecodeError::InvalidDigit { field: "version" })?;
    let layout = LAYOUTS
        .iter()
        .find(|layout| layout.version.number() == number)
        .ok_or_else(|| DecodeError::UnknownVersion(version_digits.to_string()))?;

    if prefs.len() != layout.total_len() {
        return Err(DecodeError::Malformed(format!(
            "{} suffix must be {} characters, got {}",
            layout.version,
            layout.total_len(),
            prefs.len()
        )));
    }

    let tip_value = field(prefs, layout.tip_start(), layout.tip_width, "tip")?;
    let tip = match layout.version {
        PreferenceVersion::V2 => {
            let tip_type = prefs
                .get(layout.tip_type_start()..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or_default();
            if tip_type != LEGACY_PERCENTAGE_TYPE {
                return Err(DecodeError::UnsupportedTipType(tip_type));
            }
            Percentage::new(tip_value)
                .map(TipValue::Percentage)
                .map_err(|_| DecodeError::OutOfRange(tip_value))?
        }
        PreferenceVersion::V3 => TipValue::from_encoded(tip_value)?,
    };

    let color = field(prefs, layout.color_start(), COLOR_WIDTH, "color")?;

    Ok(Preferences {
        version: layout.version,
        tip,
        color: color as ColorIndex,
    })
}

/// Parses the base-36 field `prefs[start..start + width]`.
fn field(prefs: &str, start: usize, width: usize, name: &'static str) -> Result<u32, DecodeError> {
    prefs
        .get(start..start + width)
        .and_then(parse_base36)
        .ok_or(DecodeError::InvalidDigit { field: name })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tip::{MAX_CASH_CENTS, MAX_ENCODED, MAX_PERCENTAGE};

    fn pct(v: u32) -> TipValue {
        TipValue::percentage(v).unwrap()
    }

    fn cash(v: u32) -> TipValue {
        TipValue::cash_cents(v).unwrap()
    }

    #[test]
    fn test_layout_offsets() {
        let v3 = PreferenceVersion::V3.layout();
        assert_eq!(v3.tip_start(), 2);
        assert_eq!(v3.color_start(), 5);
        assert_eq!(v3.sentinel_start(), 6);
        assert_eq!(v3.total_len(), 8);

        let v2 = PreferenceVersion::V2.layout();
        assert_eq!(v2.tip_type_start(), 2);
        assert_eq!(v2.tip_start(), 3);
        assert_eq!(v2.color_start(), 5);
        assert_eq!(v2.total_len(), 8);

        assert_eq!(LAYOUTS[0].version, PreferenceVersion::CURRENT);
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(7, &pct(2)).unwrap(), "030027LU");
        assert_eq!(encode(-1, &pct(3)).unwrap(), "030030LU");
        assert_eq!(encode(35, &pct(1)).unwrap(), "03001ZLU");
        assert_eq!(encode(0, &pct(MAX_PERCENTAGE)).unwrap(), "030ZZ0LU");
        assert_eq!(encode(0, &cash(0)).unwrap(), "031000LU");
        assert_eq!(encode(10, &cash(MAX_CASH_CENTS)).unwrap(), "03ZZZALU");
    }

    #[test]
    fn test_encode_oversized_color_falls_back_to_zero() {
        assert_eq!(encode(36, &pct(2)).unwrap(), "030020LU");
        assert_eq!(encode(i32::MAX, &pct(2)).unwrap(), "030020LU");
        assert_eq!(encode(i32::MIN, &pct(2)).unwrap(), "030020LU");
    }

    #[test]
    fn test_encode_is_uppercase_and_fixed_width() {
        for color in 0..36 {
            let suffix = encode(color, &cash(12_345)).unwrap();
            assert_eq!(suffix.len(), 8);
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_encode_rejects_tip_wider_than_field() {
        let legacy = PreferenceVersion::V2.layout();
        assert_eq!(
            encode_with(legacy, 0, &cash(0)),
            Err(EncodeError::TipTooLarge {
                encoded: 1296,
                width: 2
            })
        );

        // The widest tip a legacy card ever held still fits.
        assert_eq!(encode_with(legacy, 3, &pct(MAX_PERCENTAGE)).unwrap(), "020ZZ3LU");
        assert_eq!(encode_with(legacy, 35, &pct(1)).unwrap(), "02001ZLU");
    }

    #[test]
    fn test_canonical_suffix_survives_decode_then_encode() {
        for encoded in (0..=MAX_ENCODED).step_by(97).chain([MAX_ENCODED]) {
            let tip_digits = left_pad_with_zeros(Some(&to_base36(encoded)), 3);
            for color in 0..36u32 {
                let suffix = format!("03{tip_digits}{}LU", to_base36(color));
                let prefs = decode(&suffix).unwrap();
                assert_eq!(encode(prefs.color, &prefs.tip).unwrap(), suffix);
            }
        }
    }

    #[test]
    fn test_decode_color_known_values() {
        assert_eq!(decode_color("030012LU"), 2);
        assert_eq!(decode_color("02001ZLU"), 35);
        assert_eq!(decode_color("02001zLU"), 35);
    }

    #[test]
    fn test_decode_color_fail_soft() {
        assert_eq!(decode_color(""), COLOR_UNKNOWN);
        assert_eq!(decode_color("X"), COLOR_UNKNOWN);
        assert_eq!(decode_color("not-LU-terminated"), COLOR_UNKNOWN);
        assert_eq!(decode_color("7LU"), COLOR_UNKNOWN);
        assert_eq!(decode_color("03002-LU"), COLOR_UNKNOWN);
        assert_eq!(decode_color("0300éLU"), COLOR_UNKNOWN);
    }

    /// Unknown version fields still yield a color (lenient decode).
    #[test]
    fn test_decode_color_ignores_version_field() {
        assert_eq!(decode_color("99ZZZ4LU"), 4);
        assert_eq!(decode_color("TOKEN-123-030025LU"), 5);
    }

    #[test]
    fn test_color_round_trip() {
        for tip in [pct(0), pct(15), pct(MAX_PERCENTAGE), cash(0), cash(MAX_CASH_CENTS)] {
            for color in 0..36 {
                assert_eq!(decode_color(&encode(color, &tip).unwrap()), color);
            }
            // Negative colors only survive as 0.
            assert_eq!(decode_color(&encode(-1, &tip).unwrap()), 0);
        }
    }

    #[test]
    fn test_get_preference_version() {
        assert_eq!(get_preference_version("030027LU"), PreferenceVersion::V3);
        assert_eq!(get_preference_version("02001ZLU"), PreferenceVersion::V2);

        // Unknown or garbled input defaults to current.
        assert_eq!(get_preference_version("09001ZLU"), PreferenceVersion::V3);
        assert_eq!(get_preference_version(""), PreferenceVersion::V3);
        assert_eq!(get_preference_version("02001ZLUX"), PreferenceVersion::V3);
    }

    #[test]
    fn test_strict_decode_round_trip() {
        let tips = [
            pct(0),
            pct(99),
            pct(MAX_PERCENTAGE),
            cash(1),
            cash(2500),
            cash(MAX_CASH_CENTS),
        ];
        for tip in tips {
            for color in [0, 9, 10, 35] {
                let prefs = decode(&encode(color, &tip).unwrap()).unwrap();
                assert_eq!(
                    prefs,
                    Preferences {
                        version: PreferenceVersion::V3,
                        tip,
                        color,
                    }
                );
            }
        }
    }

    #[test]
    fn test_strict_decode_legacy() {
        let prefs = decode("02001ZLU").unwrap();
        assert_eq!(prefs.version, PreferenceVersion::V2);
        assert_eq!(prefs.tip, pct(1));
        assert_eq!(prefs.color, 35);

        let prefs = decode("020ZZ3LU").unwrap();
        assert_eq!(prefs.tip, pct(1295));

        assert_eq!(decode("02101ZLU"), Err(DecodeError::UnsupportedTipType('1')));
    }

    #[test]
    fn test_strict_decode_errors() {
        assert!(matches!(decode("030027XX"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("0300027LU"), Err(DecodeError::Malformed(_))));
        assert_eq!(
            decode("090027LU"),
            Err(DecodeError::UnknownVersion("09".to_string()))
        );
        assert_eq!(
            decode("--0027LU"),
            Err(DecodeError::InvalidDigit { field: "version" })
        );
        assert_eq!(
            decode("03-027LU"),
            Err(DecodeError::InvalidDigit { field: "tip" })
        );
        assert_eq!(
            decode("03002?LU"),
            Err(DecodeError::InvalidDigit { field: "color" })
        );
    }

    #[test]
    fn test_strict_decode_tip_ceiling() {
        assert_eq!(decode("03ZZZ0LU").unwrap().tip, cash(MAX_CASH_CENTS));
        assert_eq!(decode("031000LU").unwrap().tip, cash(0));
        assert_eq!(decode("030ZZ0LU").unwrap().tip, pct(MAX_PERCENTAGE));
    }
}
