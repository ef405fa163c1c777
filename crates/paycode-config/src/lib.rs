//! # paycode-config: Host Configuration
//!
//! Loads the color palette and encoding defaults that `paycode-core`
//! deliberately knows nothing about.
//!
//! ## Usage
//! ```rust,no_run
//! use paycode_config::PaycodeConfig;
//! use paycode_core::parse_color;
//!
//! let config = PaycodeConfig::load(None).unwrap();
//! let palette = config.palette().unwrap();
//! let color = parse_color(&palette, "4F7A9C21030027LU");
//! println!("card color: {color}");
//! ```

pub mod config;
pub mod error;

pub use config::{CodeSettings, PaletteSettings, PaycodeConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult};
