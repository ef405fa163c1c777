//! Command handlers. Each returns the text to print so it can be tested
//! without capturing stdout.

use anyhow::{Context, Result};
use paycode_config::PaycodeConfig;
use paycode_core::preferences::get_preference_version;
use paycode_core::{
    encode_code, parse_color, parse_preferences, split_code, ColorIndex, TipValue,
};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::args::TipArg;

/// `paycode encode`: token + current-version suffix.
pub fn encode(
    config: &PaycodeConfig,
    token: Option<&str>,
    color: Option<ColorIndex>,
    tip: TipArg,
) -> Result<String> {
    let tip = match tip {
        TipArg::Percent(p) => TipValue::percentage(p),
        TipArg::Cents(c) => TipValue::cash_cents(c),
    }
    .context("invalid tip")?;

    let token = match token {
        Some(token) => token.to_string(),
        None => {
            let generated = Uuid::new_v4().simple().to_string().to_uppercase();
            debug!(token = %generated, "Generated random token");
            generated
        }
    };

    let color = color.unwrap_or_else(|| config.default_color_index());
    let code = encode_code(&token, color, &tip)?;
    info!(%tip, color, "Encoded payment code");
    Ok(code)
}

/// `paycode color`: fail-soft color lookup, always prints a color.
pub fn color(config: &PaycodeConfig, code: &str) -> Result<String> {
    let palette = config.palette()?;
    Ok(parse_color(&palette, code).to_string())
}

/// `paycode inspect`: strict decode of everything the code carries.
pub fn inspect(config: &PaycodeConfig, code: &str, as_json: bool) -> Result<String> {
    let (token, suffix) = split_code(code);
    let prefs = parse_preferences(code).with_context(|| format!("cannot decode {code:?}"))?;
    let color = color(config, code)?;

    if as_json {
        let value = json!({
            "token": token,
            "suffix": suffix,
            "preferences": prefs,
            "display_color": color,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let detected = suffix.map(get_preference_version).unwrap_or(prefs.version);
    Ok(format!(
        "token:   {token}\nsuffix:  {}\nversion: {detected}\ntip:     {}\ncolor:   {} ({color})",
        suffix.unwrap_or_default(),
        prefs.tip,
        prefs.color,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_with_token() {
        let config = PaycodeConfig::default();
        let code = encode(&config, Some("TOKEN"), Some(7), TipArg::Percent(2)).unwrap();
        assert_eq!(code, "TOKEN030027LU");
    }

    #[test]
    fn test_encode_uses_config_default_color() {
        let mut config = PaycodeConfig::default();
        config.code.default_color_index = 3;
        let code = encode(&config, Some("T"), None, TipArg::Cents(0)).unwrap();
        assert_eq!(code, "T031003LU");
    }

    #[test]
    fn test_encode_random_token() {
        let config = PaycodeConfig::default();
        let code = encode(&config, None, Some(1), TipArg::Percent(0)).unwrap();
        assert_eq!(code.len(), 32 + 8);
        assert!(code.ends_with("030001LU"));
    }

    #[test]
    fn test_encode_rejects_bad_tip() {
        let config = PaycodeConfig::default();
        assert!(encode(&config, Some("T"), None, TipArg::Percent(1296)).is_err());
        assert!(encode(&config, Some("T"), None, TipArg::Cents(45360)).is_err());
    }

    #[test]
    fn test_color_is_fail_soft() {
        let config = PaycodeConfig::default();
        assert_eq!(color(&config, "T030021LU").unwrap(), "#1B5E20");
        assert_eq!(color(&config, "garbage").unwrap(), "#212121");
        assert_eq!(color(&config, "").unwrap(), "#212121");
    }

    #[test]
    fn test_inspect() {
        let config = PaycodeConfig::default();
        let text = inspect(&config, "TOKEN0300F1LU", false).unwrap();
        assert!(text.contains("token:   TOKEN"));
        assert!(text.contains("version: v3"));
        assert!(text.contains("tip:     15%"));
        assert!(text.contains("color:   1 (#1B5E20)"));

        let json = inspect(&config, "TOKEN02001ZLU", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["preferences"]["version"], "v2");
        assert_eq!(value["preferences"]["tip"]["kind"], "percentage");
        assert_eq!(value["preferences"]["color"], 35);

        assert!(inspect(&config, "TOKEN", false).is_err());
    }
}
