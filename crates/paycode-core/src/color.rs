//! # Color Module
//!
//! Display colors and the lookup table that resolves a scanned color index.
//!
//! ## Index vs Color
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code "…030027LU"  ──►  color index 7  ──►  ColorTable  ──►  #1B5E20    │
//! │                         (one base-36      (host-owned,       (what the  │
//! │                          digit, 0..=35)    read-only)         UI shows) │
//! │                                                                         │
//! │  The code only ever carries the index. The host application decides    │
//! │  what index 7 looks like, so a palette refresh never invalidates        │
//! │  already-printed cards.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// A color index as carried by a preferences suffix.
pub type ColorIndex = i32;

/// Returned when no color index could be read from a code.
pub const COLOR_UNKNOWN: ColorIndex = -1;

/// Number of indices a single base-36 digit can address.
pub const MAX_PALETTE_SIZE: usize = 36;

// =============================================================================
// Color
// =============================================================================

/// A 24-bit RGB display color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Creates a color from its red, green and blue channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    ///
    /// ## Example
    /// ```rust
    /// use paycode_core::color::Color;
    ///
    /// let green = Color::from_hex("#1B5E20").unwrap();
    /// assert_eq!(green, Color::rgb(0x1B, 0x5E, 0x20));
    /// assert!(Color::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(Color)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    }

    /// Returns the packed `0xRRGGBB` value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// =============================================================================
// Color Table
// =============================================================================

/// Resolves color indices to display colors.
///
/// Supplied by the embedding application. The codec only reads from it, so
/// implementations used across threads handle their own synchronization.
pub trait ColorTable {
    /// Returns the color at `index`, or `None` outside the palette.
    fn resolve(&self, index: u32) -> Option<Color>;

    /// Color shown when a code carries no usable index.
    fn default_color(&self) -> Color;
}

/// An immutable in-memory [`ColorTable`].
///
/// ## Example
/// ```rust
/// use paycode_core::color::{Color, ColorTable, Palette};
///
/// let palette = Palette::new(
///     vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)],
///     Color::rgb(0, 0, 0),
/// ).unwrap();
///
/// assert_eq!(palette.resolve(1), Some(Color::rgb(0, 0, 255)));
/// assert_eq!(palette.resolve(2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    default: Color,
}

impl Palette {
    /// Builds a palette, rejecting more entries than one digit can index.
    pub fn new(colors: Vec<Color>, default: Color) -> Result<Self, ColorError> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(ColorError::PaletteTooLarge {
                len: colors.len(),
                max: MAX_PALETTE_SIZE,
            });
        }
        Ok(Palette { colors, default })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl ColorTable for Palette {
    fn resolve(&self, index: u32) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    fn default_color(&self) -> Color {
        self.default
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
