//! # paycode-core: Pure Codec for Printed Payment Codes
//!
//! This crate is the **heart** of Paycode. It turns a payment token plus two
//! small preferences (a tip and a card color) into a short, scanner-friendly
//! string, and reads them back out of scanned codes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paycode Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Hosts (scanner apps, card printers, apps/cli)          │   │
//! │  │     QR rendering ──► token redemption ──► palette resources     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ paycode-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐  ┌────────┐  ┌─────────────┐  ┌──────────────┐ │   │
//! │  │  │fixed_width │◄─│  tip   │◄─│ preferences │◄─│ payment_code │ │   │
//! │  │  │ base-36    │  │TipValue│  │  V2 / V3    │  │ token+suffix │ │   │
//! │  │  └────────────┘  └────────┘  └─────────────┘  └──────┬───────┘ │   │
//! │  │                                                       │         │   │
//! │  │                                            ┌──────────▼──────┐  │   │
//! │  │                                            │ color           │  │   │
//! │  │                                            │ ColorTable trait│  │   │
//! │  │                                            └─────────────────┘  │   │
//! │  │   NO I/O • NO ENVIRONMENT • NO GLOBAL STATE • PURE FUNCTIONS   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                paycode-config (Configuration)                   │   │
//! │  │           paycode.toml, environment, palette loading            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fixed_width`] - Base-36 fields, zero padding, version checks
//! - [`tip`] - `TipValue`: percentage or cash, folded into one number
//! - [`preferences`] - Versioned suffix encode/decode
//! - [`payment_code`] - Full code: token + suffix, color resolution
//! - [`color`] - `Color`, the `ColorTable` collaborator and `Palette`
//! - [`error`] - Typed errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, safe from any thread
//! 2. **Fail-Soft Scanning**: garbled codes give a default color, never an error
//! 3. **Typed Encoding Errors**: the printing side gets `Result`s, never sentinels
//! 4. **Forever Decodable**: once a suffix version ships, it stays readable
//!
//! ## Example Usage
//!
//! ```rust
//! use paycode_core::color::{Color, Palette};
//! use paycode_core::payment_code::{encode_code, parse_color};
//! use paycode_core::tip::TipValue;
//!
//! // Print: token + 15% tip + color 1
//! let tip = TipValue::percentage(15).unwrap();
//! let code = encode_code("4F7A9C21", 1, &tip).unwrap();
//! assert_eq!(code, "4F7A9C210300F1LU");
//!
//! // Scan: resolve the card color through the host palette
//! let palette = Palette::new(
//!     vec![Color::rgb(0, 0, 0), Color::rgb(0x1B, 0x5E, 0x20)],
//!     Color::rgb(0x21, 0x21, 0x21),
//! ).unwrap();
//! assert_eq!(parse_color(&palette, &code), Color::rgb(0x1B, 0x5E, 0x20));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod color;
pub mod error;
pub mod fixed_width;
pub mod payment_code;
pub mod preferences;
pub mod tip;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use color::{Color, ColorIndex, ColorTable, Palette, COLOR_UNKNOWN};
pub use error::{CodecError, CodecResult, ColorError, DecodeError, EncodeError, TipError};
pub use payment_code::{encode_code, parse_color, parse_preferences, split_code};
pub use preferences::{PreferenceVersion, Preferences};
pub use tip::{CashCents, Percentage, TipKind, TipValue};
