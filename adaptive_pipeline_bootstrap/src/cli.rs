// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling with security-first design.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  1. parser::parse_cli()             │  Parse CLI with clap
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  2. validator::validate_cli()       │  Security validation
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  3. ValidatedCli                    │  Safe, validated config
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `parser` - CLI structure and clap parsing
//! - `validator` - Security validation layer

pub mod parser;
pub mod validator;

pub use parser::{parse_cli, Cli, Commands, StageCommand};
pub use validator::{ParseError, SecureArgParser};

/// Validated CLI configuration: every argument security-checked and
/// range-checked, ready to hand to the application layer.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    RunDiscover { speaker: String, from: String, to: String },
    RunScrape { fanout: Option<usize>, timeout_secs: Option<u64> },
    RunSummarize { fanout: Option<usize>, timeout_secs: Option<u64> },
    RunCategorize { fanout: Option<usize>, timeout_secs: Option<u64> },
    RunGraph { fanout: Option<usize>, timeout_secs: Option<u64> },
    Status { stage: Option<String>, failed: bool },
    Invalidate { id: String },
}

/// Parses and validates CLI arguments in one call: `parser::parse_cli`
/// then `validate_cli`.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parse_cli();
    validate_cli(cli)
}

fn validate_fanout(fanout: Option<usize>) -> Result<(), ParseError> {
    match fanout {
        Some(0) => Err(ParseError::InvalidValue {
            arg: "fanout".to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Some(f) if f > 256 => Err(ParseError::InvalidValue {
            arg: "fanout".to_string(),
            reason: "must not exceed 256".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let config = if let Some(ref path) = cli.config {
        SecureArgParser::validate_argument(&path.to_string_lossy())?;
        Some(path.clone())
    } else {
        None
    };

    let command = match cli.command {
        Commands::Run { stage } => match stage {
            StageCommand::Discover { speaker, from, to } => {
                SecureArgParser::validate_argument(&speaker)?;
                SecureArgParser::validate_argument(&from)?;
                SecureArgParser::validate_argument(&to)?;
                ValidatedCommand::RunDiscover { speaker, from, to }
            }
            StageCommand::Scrape { fanout, timeout } => {
                validate_fanout(fanout)?;
                ValidatedCommand::RunScrape { fanout, timeout_secs: timeout }
            }
            StageCommand::Summarize { fanout, timeout } => {
                validate_fanout(fanout)?;
                ValidatedCommand::RunSummarize { fanout, timeout_secs: timeout }
            }
            StageCommand::Categorize { fanout, timeout } => {
                validate_fanout(fanout)?;
                ValidatedCommand::RunCategorize { fanout, timeout_secs: timeout }
            }
            StageCommand::Graph { fanout, timeout } => {
                validate_fanout(fanout)?;
                ValidatedCommand::RunGraph { fanout, timeout_secs: timeout }
            }
        },
        Commands::Status { stage, failed } => {
            if let Some(ref s) = stage {
                SecureArgParser::validate_argument(s)?;
            }
            ValidatedCommand::Status { stage, failed }
        }
        Commands::Invalidate { id } => {
            SecureArgParser::validate_argument(&id)?;
            ValidatedCommand::Invalidate { id }
        }
    };

    Ok(ValidatedCli { command, verbose: cli.verbose, config })
}
