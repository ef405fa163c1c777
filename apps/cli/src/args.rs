//! Command-line argument parsing.
//!
//! ## Usage
//! ```text
//! paycode [--config <PATH>] encode <TOKEN|-> [--color N] [--percent P | --cents C]
//! paycode [--config <PATH>] color <CODE>
//! paycode [--config <PATH>] inspect <CODE> [--json]
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Paycode - print and scan payment codes

Usage: paycode [OPTIONS] <COMMAND>

Commands:
  encode <TOKEN|->   Append a preferences suffix to TOKEN (- = random token)
  color <CODE>       Print the card color for a scanned code
  inspect <CODE>     Print token, version, tip and color of a scanned code

Options:
  -c, --config <PATH>  Config file (default: per-user paycode.toml)
      --color <N>      Color index for encode (default: from config)
      --percent <P>    Percentage tip for encode (default: 0)
      --cents <C>      Cash tip in cents for encode
      --json           Print inspect output as JSON
  -h, --help           Show this help message";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Encode {
        /// `None` means "generate a random token".
        token: Option<String>,
        color: Option<i32>,
        tip: TipArg,
    },
    Color {
        code: String,
    },
    Inspect {
        code: String,
        json: bool,
    },
    Help,
}

/// Tip requested on the command line, validated later by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipArg {
    Percent(u32),
    Cents(u32),
}

impl Default for TipArg {
    fn default() -> Self {
        TipArg::Percent(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing command (try --help)")]
    MissingCommand,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("--percent and --cents are mutually exclusive")]
    ConflictingTips,

    #[error("unexpected argument '{0}'")]
    Unexpected(String),
}

/// Parses `args` (without the program name).
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Cli, ArgsError> {
    let mut config = None;
    let mut positional: Vec<String> = Vec::new();
    let mut color = None;
    let mut tip = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        match arg {
            "--help" | "-h" => {
                return Ok(Cli {
                    config,
                    command: Command::Help,
                })
            }
            "--config" | "-c" => {
                config = Some(PathBuf::from(value(args, &mut i, "--config")?));
            }
            "--color" => {
                color = Some(number(args, &mut i, "--color")?);
            }
            "--percent" | "--cents" => {
                if tip.is_some() {
                    return Err(ArgsError::ConflictingTips);
                }
                tip = Some(if arg == "--percent" {
                    TipArg::Percent(number(args, &mut i, "--percent")?)
                } else {
                    TipArg::Cents(number(args, &mut i, "--cents")?)
                });
            }
            "--json" => json = true,
            // A lone "-" is the random-token placeholder, not a flag.
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(ArgsError::Unexpected(flag.to_string()))
            }
            _ => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None => return Err(ArgsError::MissingCommand),
        Some("encode") => {
            let token = positional.next().ok_or(ArgsError::MissingValue("encode"))?;
            Command::Encode {
                token: (token != "-").then_some(token),
                color,
                tip: tip.unwrap_or_default(),
            }
        }
        Some("color") => Command::Color {
            code: positional.next().ok_or(ArgsError::MissingValue("color"))?,
        },
        Some("inspect") => Command::Inspect {
            code: positional.next().ok_or(ArgsError::MissingValue("inspect"))?,
            json,
        },
        Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    if let Some(extra) = positional.next() {
        return Err(ArgsError::Unexpected(extra));
    }

    Ok(Cli { config, command })
}

fn value<S: AsRef<str>>(
    args: &[S],
    i: &mut usize,
    flag: &'static str,
) -> Result<String, ArgsError> {
    *i += 1;
    args.get(*i)
        .map(|v| v.as_ref().to_string())
        .ok_or(ArgsError::MissingValue(flag))
}

fn number<S: AsRef<str>, T: std::str::FromStr>(
    args: &[S],
    i: &mut usize,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = value(args, i, flag)?;
    raw.parse()
        .map_err(|_| ArgsError::InvalidValue { flag, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encode() {
        let cli = parse_args(&["encode", "TOKEN", "--color", "7", "--percent", "15"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(
            cli.command,
            Command::Encode {
                token: Some("TOKEN".to_string()),
                color: Some(7),
                tip: TipArg::Percent(15),
            }
        );
    }

    #[test]
    fn test_parse_encode_random_token_and_cents() {
        let cli = parse_args(&["-c", "/tmp/p.toml", "encode", "-", "--cents", "250"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(
            cli.command,
            Command::Encode {
                token: None,
                color: None,
                tip: TipArg::Cents(250),
            }
        );
    }

    #[test]
    fn test_parse_negative_color() {
        let cli = parse_args(&["encode", "T", "--color", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Encode { color: Some(-1), .. }));
    }

    #[test]
    fn test_parse_scan_commands() {
        assert_eq!(
            parse_args(&["color", "T030027LU"]).unwrap().command,
            Command::Color {
                code: "T030027LU".to_string()
            }
        );
        assert_eq!(
            parse_args(&["inspect", "--json", "T030027LU"]).unwrap().command,
            Command::Inspect {
                code: "T030027LU".to_string(),
                json: true,
            }
        );
        assert_eq!(parse_args(&["--help"]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        let none: [&str; 0] = [];
        assert_eq!(parse_args(&none), Err(ArgsError::MissingCommand));
        assert_eq!(
            parse_args(&["print"]),
            Err(ArgsError::UnknownCommand("print".to_string()))
        );
        assert_eq!(parse_args(&["color"]), Err(ArgsError::MissingValue("color")));
        assert_eq!(
            parse_args(&["encode", "T", "--color"]),
            Err(ArgsError::MissingValue("--color"))
        );
        assert!(matches!(
            parse_args(&["encode", "T", "--percent", "ten"]),
            Err(ArgsError::InvalidValue { flag: "--percent", .. })
        ));
        assert_eq!(
            parse_args(&["encode", "T", "--percent", "1", "--cents", "1"]),
            Err(ArgsError::ConflictingTips)
        );
        assert_eq!(
            parse_args(&["color", "A", "B"]),
            Err(ArgsError::Unexpected("B".to_string()))
        );
        assert_eq!(
            parse_args(&["color", "A", "--verbose"]),
            Err(ArgsError::Unexpected("--verbose".to_string()))
        );
    }
}
