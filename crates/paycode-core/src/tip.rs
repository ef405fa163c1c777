//! # Tip Module
//!
//! The tip preference printed into a payment code.
//!
//! ## One Field, Two Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Encoded Value Space (0..=46655)                      │
//! │                                                                         │
//! │   0 ─────────────── 1295 │ 1296 ──────────────────────────────── 46655 │
//! │   Percentage(v) = v      │ CashCents(v) = 1296 + v                     │
//! │   "000" ........ "0ZZ"   │ "100" .............................. "ZZZ" │
//! │                                                                         │
//! │  The sub-range IS the type tag. There is no discriminant digit, which  │
//! │  is what lets the current format use one 3-digit field where the      │
//! │  legacy format needed a type digit plus a 2-digit value.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paycode_core::tip::TipValue;
//!
//! let tip = TipValue::percentage(15).unwrap();
//! assert_eq!(tip.encoded_value(), 15);
//!
//! let tip = TipValue::cash_cents(250).unwrap(); // $2.50
//! assert_eq!(tip.encoded_value(), 1546);
//! assert_eq!(TipValue::from_encoded(1546).unwrap(), tip);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{DecodeError, TipError};

/// Largest percentage: two base-36 digits, `"ZZ"`.
pub const MAX_PERCENTAGE: u32 = 1295;

/// Largest cash tip in cents, so that `CASH_OFFSET + MAX_CASH_CENTS` is `"ZZZ"`.
pub const MAX_CASH_CENTS: u32 = 45359;

/// First encoded value belonging to cash tips.
pub const CASH_OFFSET: u32 = MAX_PERCENTAGE + 1;

/// Largest encoded value of any tip.
pub const MAX_ENCODED: u32 = CASH_OFFSET + MAX_CASH_CENTS;

// =============================================================================
// Tip Kind
// =============================================================================

/// Which half of the encoded space a tip lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    Percentage,
    CashCents,
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipKind::Percentage => write!(f, "percentage"),
            TipKind::CashCents => write!(f, "cash"),
        }
    }
}

// =============================================================================
// Bounded Values
// =============================================================================

/// A tip percentage in `0..=1295`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percentage(#[ts(as = "u32")] u16);

impl Percentage {
    /// Creates a percentage, rejecting anything above [`MAX_PERCENTAGE`].
    ///
    /// ## Example
    /// ```rust
    /// use paycode_core::tip::Percentage;
    ///
    /// assert_eq!(Percentage::new(18).unwrap().get(), 18);
    /// assert!(Percentage::new(1296).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self, TipError> {
        if value > MAX_PERCENTAGE {
            return Err(TipError::ValueOutOfRange {
                kind: TipKind::Percentage,
                value,
                max: MAX_PERCENTAGE,
            });
        }
        Ok(Percentage(value as u16))
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for Percentage {
    type Error = TipError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl From<Percentage> for u32 {
    fn from(value: Percentage) -> Self {
        value.get()
    }
}

/// A cash tip in US cents, `0..=45359`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(try_from = "u32", into = "u32")]
pub struct CashCents(#[ts(as = "u32")] u16);

impl CashCents {
    /// Creates a cash tip, rejecting anything above [`MAX_CASH_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use paycode_core::tip::CashCents;
    ///
    /// assert_eq!(CashCents::new(45359).unwrap().get(), 45359);
    /// assert!(CashCents::new(45360).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self, TipError> {
        if value > MAX_CASH_CENTS {
            return Err(TipError::ValueOutOfRange {
                kind: TipKind::CashCents,
                value,
                max: MAX_CASH_CENTS,
            });
        }
        Ok(CashCents(value as u16))
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for CashCents {
    type Error = TipError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CashCents::new(value)
    }
}

impl From<CashCents> for u32 {
    fn from(value: CashCents) -> Self {
        value.get()
    }
}

// =============================================================================
// Tip Value
// =============================================================================

/// A tip preference: either a percentage or a fixed cash amount.
///
/// Equality and ordering compare the variant first, so
/// `Percentage(5) != CashCents(5)` and every percentage sorts before every
/// cash amount.
///
/// ## Wire vs JSON
/// On the wire the variant is implied by the encoded value's sub-range.
/// JSON (for frontends) is adjacently tagged:
/// `{"kind": "cash_cents", "value": 250}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TipValue {
    Percentage(Percentage),
    CashCents(CashCents),
}

impl TipValue {
    /// Shorthand for `TipValue::Percentage(Percentage::new(v)?)`.
    pub fn percentage(value: u32) -> Result<Self, TipError> {
        Percentage::new(value).map(TipValue::Percentage)
    }

    /// Shorthand for `TipValue::CashCents(CashCents::new(v)?)`.
    pub fn cash_cents(value: u32) -> Result<Self, TipError> {
        CashCents::new(value).map(TipValue::CashCents)
    }

    /// Returns which half of the encoded space this tip uses.
    pub const fn kind(&self) -> TipKind {
        match self {
            TipValue::Percentage(_) => TipKind::Percentage,
            TipValue::CashCents(_) => TipKind::CashCents,
        }
    }

    /// Returns the raw value (percent or cents) without the range offset.
    pub const fn value(&self) -> u32 {
        match self {
            TipValue::Percentage(p) => p.get(),
            TipValue::CashCents(c) => c.get(),
        }
    }

    /// Folds variant and value into the shared integer space.
    ///
    /// Always `<=` [`MAX_ENCODED`], so three base-36 digits suffice.
    pub const fn encoded_value(&self) -> u32 {
        match self {
            TipValue::Percentage(p) => p.get(),
            TipValue::CashCents(c) => CASH_OFFSET + c.get(),
        }
    }

    /// Recovers a tip from its encoded value by sub-range.
    ///
    /// ## Example
    /// ```rust
    /// use paycode_core::tip::{TipKind, TipValue};
    ///
    /// assert_eq!(TipValue::from_encoded(1295).unwrap().kind(), TipKind::Percentage);
    /// assert_eq!(TipValue::from_encoded(1296).unwrap().kind(), TipKind::CashCents);
    /// assert!(TipValue::from_encoded(46656).is_err());
    /// ```
    pub fn from_encoded(encoded: u32) -> Result<Self, DecodeError> {
        match encoded {
            0..=MAX_PERCENTAGE => Ok(TipValue::Percentage(Percentage(encoded as u16))),
            CASH_OFFSET..=MAX_ENCODED => Ok(TipValue::CashCents(CashCents(
                (encoded - CASH_OFFSET) as u16,
            ))),
            _ => Err(DecodeError::OutOfRange(encoded)),
        }
    }
}

/// Display for logs and the CLI: `15%` or `$2.50`.
impl fmt::Display for TipValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipValue::Percentage(p) => write!(f, "{}%", p.get()),
            TipValue::CashCents(c) => write!(f, "${}.{:02}", c.get() / 100, c.get() % 100),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
