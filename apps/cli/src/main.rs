//! # Paycode CLI
//!
//! Thin front end over `paycode-core` for printing and checking codes.
//!
//! ## Usage
//! ```bash
//! # Print a code for a token with a 15% tip and color 1
//! paycode encode 4F7A9C21 --percent 15 --color 1
//!
//! # Resolve the card color of a scanned code
//! paycode color 4F7A9C210300F1LU
//!
//! # Decode everything a scanned code carries
//! paycode inspect 4F7A9C210300F1LU --json
//! ```
//!
//! Logs go to stderr (`RUST_LOG=paycode_core=trace` shows why a scan fell
//! back to the default color); stdout carries only the result.

mod args;
mod commands;

use std::process::ExitCode;

use paycode_config::PaycodeConfig;
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, Cli, Command, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    // Help must work even when the config file is broken.
    if cli.command == Command::Help {
        return Ok(USAGE.to_string());
    }

    let config = PaycodeConfig::load(cli.config)?;
    execute(&config, cli.command)
}

fn execute(config: &PaycodeConfig, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Encode { token, color, tip } => {
            commands::encode(config, token.as_deref(), color, tip)
        }
        Command::Color { code } => commands::color(config, &code),
        Command::Inspect { code, json } => commands::inspect(config, &code, json),
        Command::Help => Ok(USAGE.to_string()),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=paycode_core=trace` - Trace every decoded color
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
