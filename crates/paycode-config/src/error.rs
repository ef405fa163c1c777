//! # Config Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Config Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      File       │  │     Format      │  │      Validation         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Parse          │  │  InvalidConfig          │ │
//! │  │  SaveFailed     │  │  Serialize      │  │  Codec (palette/color)  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use paycode_core::{CodecError, ColorError};
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong loading or saving `paycode.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No path given and no per-user config directory could be determined.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// Palette or color rejected by the codec.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

impl From<ColorError> for ConfigError {
    fn from(err: ColorError) -> Self {
        ConfigError::Codec(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_errors_convert() {
        let err: ConfigError = ColorError::PaletteTooLarge { len: 40, max: 36 }.into();
        assert!(matches!(err, ConfigError::Codec(CodecError::Color(_))));
        assert_eq!(
            err.to_string(),
            "Codec error: Color error: palette has 40 colors, at most 36 are addressable"
        );
    }

    #[test]
    fn test_toml_errors_convert() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
