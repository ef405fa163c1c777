//! # Paycode Configuration
//!
//! Host-side settings: the color palette codes index into, and encoding
//! defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PAYCODE_DEFAULT_COLOR=#212121                                      │
//! │     PAYCODE_DEFAULT_COLOR_INDEX=3                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/paycode/paycode.toml (Linux)                             │
//! │     ~/Library/Application Support/com.paycode.paycode/paycode.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in 8-color palette, no color preference                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # paycode.toml
//! [palette]
//! colors = ["#1B5E20", "#0D47A1", "#B71C1C"]
//! default = "#212121"
//!
//! [code]
//! default_color_index = -1   # -1 = no preference
//! ```

use paycode_core::color::{COLOR_UNKNOWN, MAX_PALETTE_SIZE};
use paycode_core::{Color, ColorIndex, Palette};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "paycode.toml";

// =============================================================================
// Palette Settings
// =============================================================================

/// The colors a code's color index points into.
///
/// Index `i` in `colors` is what a card printed with color digit `i` shows.
/// Reordering entries recolors every card already in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSettings {
    #[serde(default = "default_colors")]
    pub colors: Vec<Color>,

    /// Shown for codes with no readable or known color.
    #[serde(default = "default_fallback_color")]
    pub default: Color,
}

fn default_colors() -> Vec<Color> {
    vec![
        Color::rgb(0x21, 0x21, 0x21), // charcoal
        Color::rgb(0x1B, 0x5E, 0x20), // green
        Color::rgb(0x0D, 0x47, 0xA1), // blue
        Color::rgb(0xB7, 0x1C, 0x1C), // red
        Color::rgb(0xE6, 0x51, 0x00), // orange
        Color::rgb(0x4A, 0x14, 0x8C), // purple
        Color::rgb(0x00, 0x60, 0x64), // teal
        Color::rgb(0xF9, 0xA8, 0x25), // gold
    ]
}

fn default_fallback_color() -> Color {
    Color::rgb(0x21, 0x21, 0x21)
}

impl Default for PaletteSettings {
    fn default() -> Self {
        PaletteSettings {
            colors: default_colors(),
            default: default_fallback_color(),
        }
    }
}

// =============================================================================
// Code Settings
// =============================================================================

/// Defaults applied when printing new codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSettings {
    /// Color index used when the caller does not pick one.
    /// `-1` means "no preference" and prints as index 0.
    #[serde(default = "default_color_index")]
    pub default_color_index: ColorIndex,
}

fn default_color_index() -> ColorIndex {
    COLOR_UNKNOWN
}

impl Default for CodeSettings {
    fn default() -> Self {
        CodeSettings {
            default_color_index: default_color_index(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete Paycode host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycodeConfig {
    #[serde(default)]
    pub palette: PaletteSettings,

    #[serde(default)]
    pub code: CodeSettings,
}

impl PaycodeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the per-user `paycode.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading paycode config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load paycode config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Paycode config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.palette.colors.len() > MAX_PALETTE_SIZE {
            return Err(ConfigError::InvalidConfig(format!(
                "palette has {} colors, a code can only address {}",
                self.palette.colors.len(),
                MAX_PALETTE_SIZE
            )));
        }

        let index = self.code.default_color_index;
        if index != COLOR_UNKNOWN
            && (index < 0 || index as usize >= self.palette.colors.len())
        {
            return Err(ConfigError::InvalidConfig(format!(
                "default_color_index {} is not -1 or an index into the {}-color palette",
                index,
                self.palette.colors.len()
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source. Unparseable values are
    /// logged and ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(hex) = var("PAYCODE_DEFAULT_COLOR") {
            match hex.parse::<Color>() {
                Ok(color) => {
                    debug!(%color, "Overriding default color from environment");
                    self.palette.default = color;
                }
                Err(e) => warn!(value = %hex, error = %e, "Ignoring PAYCODE_DEFAULT_COLOR"),
            }
        }

        if let Some(index) = var("PAYCODE_DEFAULT_COLOR_INDEX") {
            match index.parse::<ColorIndex>() {
                Ok(i) => {
                    debug!(index = i, "Overriding default color index from environment");
                    self.code.default_color_index = i;
                }
                Err(_) => warn!(value = %index, "Ignoring PAYCODE_DEFAULT_COLOR_INDEX"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "paycode", "paycode")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the color table handed to `paycode_core::parse_color`.
    pub fn palette(&self) -> ConfigResult<Palette> {
        Ok(Palette::new(self.palette.colors.clone(), self.palette.default)?)
    }

    pub fn default_color_index(&self) -> ColorIndex {
        self.code.default_color_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paycode_core::ColorTable;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PaycodeConfig::default();
        assert_eq!(config.palette.colors.len(), 8);
        assert_eq!(config.code.default_color_index, COLOR_UNKNOWN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PaycodeConfig::default();

        config.code.default_color_index = 7;
        assert!(config.validate().is_ok());

        config.code.default_color_index = 8;
        assert!(config.validate().is_err());

        config.code.default_color_index = -2;
        assert!(config.validate().is_err());

        config.code.default_color_index = COLOR_UNKNOWN;
        config.palette.colors = vec![Color::rgb(0, 0, 0); MAX_PALETTE_SIZE + 1];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_parsing() {
        let config: PaycodeConfig = toml::from_str(
            r##"
            [palette]
            colors = ["#FF0000", "#00FF00"]
            default = "#000000"

            [code]
            default_color_index = 1
            "##,
        )
        .unwrap();

        assert_eq!(config.palette.colors, vec![Color::rgb(255, 0, 0), Color::rgb(0, 255, 0)]);
        assert_eq!(config.palette.default, Color::rgb(0, 0, 0));
        assert_eq!(config.code.default_color_index, 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PaycodeConfig = toml::from_str("[code]\ndefault_color_index = 2\n").unwrap();
        assert_eq!(config.palette, PaletteSettings::default());
        assert_eq!(config.code.default_color_index, 2);
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let err = toml::from_str::<PaycodeConfig>("[palette]\ncolors = [\"#XYZ\"]\n").unwrap_err();
        assert!(err.to_string().contains("#RRGGBB, got \"#XYZ\""));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = PaycodeConfig::default();
        config.palette.colors.truncate(3);
        config.code.default_color_index = 2;
        config.save(Some(path.clone())).unwrap();

        let loaded = PaycodeConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[code]\ndefault_color_index = 99\n").unwrap();

        assert!(PaycodeConfig::from_file(&path).is_ok());
        assert!(PaycodeConfig::load(Some(path.clone())).is_err());
        assert_eq!(
            PaycodeConfig::load_or_default(Some(path)),
            PaycodeConfig::default()
        );
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PAYCODE_DEFAULT_COLOR", "#ABCDEF"),
            ("PAYCODE_DEFAULT_COLOR_INDEX", "4"),
        ]
        .into_iter()
        .collect();

        let mut config = PaycodeConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.palette.default, Color::rgb(0xAB, 0xCD, 0xEF));
        assert_eq!(config.code.default_color_index, 4);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = PaycodeConfig::default();
        config.apply_overrides(|key| match key {
            "PAYCODE_DEFAULT_COLOR" => Some("red".to_string()),
            "PAYCODE_DEFAULT_COLOR_INDEX" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(config, PaycodeConfig::default());
    }

    #[test]
    fn test_palette_from_config() {
        let config = PaycodeConfig::default();
        let palette = config.palette().unwrap();
        assert_eq!(palette.resolve(1), Some(Color::rgb(0x1B, 0x5E, 0x20)));
        assert_eq!(palette.default_color(), config.palette.default);
    }
}
