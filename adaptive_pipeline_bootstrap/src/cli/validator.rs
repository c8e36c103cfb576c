// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Security Validation Layer
//!
//! Every string and path the operator passes on the command line goes
//! through here before it reaches application logic: reject null bytes,
//! shell metacharacters that would be suspicious in a value the CLI
//! otherwise treats as an opaque string, and `..` path traversal.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid value for --{arg}: {reason}")]
    InvalidValue { arg: String, reason: String },

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("argument contains disallowed characters: {0}")]
    UnsafeArgument(String),
}

const DISALLOWED_SUBSTRINGS: [&str; 4] = ["..", "\0", "$(", "`"];

/// Stateless validation helpers applied to every raw CLI argument.
pub struct SecureArgParser;

impl SecureArgParser {
    /// Rejects null bytes, path traversal sequences, and shell
    /// command-substitution syntax in an arbitrary string argument. Does
    /// not touch the filesystem.
    pub fn validate_argument(value: &str) -> Result<(), ParseError> {
        for pattern in DISALLOWED_SUBSTRINGS {
            if value.contains(pattern) {
                return Err(ParseError::UnsafeArgument(format!(
                    "{value:?} contains disallowed sequence {pattern:?}"
                )));
            }
        }
        Ok(())
    }

    /// Like `validate_argument`, but additionally requires the path to
    /// exist on disk and canonicalizes it, for arguments naming a file or
    /// directory that must already be present.
    pub fn validate_path(value: &str) -> Result<PathBuf, ParseError> {
        Self::validate_argument(value)?;
        let path = Path::new(value);
        path.canonicalize().map_err(|_| ParseError::PathNotFound(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal() {
        assert!(SecureArgParser::validate_argument("../etc/passwd").is_err());
    }

    #[test]
    fn rejects_command_substitution() {
        assert!(SecureArgParser::validate_argument("$(rm -rf /)").is_err());
    }

    #[test]
    fn accepts_plain_speaker_name() {
        SecureArgParser::validate_argument("jane-doe").unwrap();
    }

    #[test]
    fn validate_path_rejects_missing_file() {
        assert!(SecureArgParser::validate_path("/no/such/path/hopefully").is_err());
    }
}
