// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! `AppConfig` is the single validated source of truth for everything the
//! runtime needs that isn't passed on the command line: where the data
//! root lives, how to reach the graph store, the LLM credential the
//! summarize/categorize stages use, and the logging level. Assembled from
//! environment variables at startup, once, in the composition root.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Deployment namespace (`{test, prod, ...}`), selecting the journal
/// filename suffix (`pipeline_state_{environment}.jsonl`) and the artifact
/// root. An arbitrary, operator-chosen string rather than a closed set of
/// variants — spec §6 calls it a "namespace", not an enum, and defaults it
/// to `test`. Validated only enough to be safe as a path/filename
/// component, since it feeds directly into both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

pub const DEFAULT_ENVIRONMENT: &str = "test";

impl Environment {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid {
                var: "ENVIRONMENT",
                reason: "must not be empty".to_string(),
            });
        }
        let is_path_safe = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_path_safe {
            return Err(ConfigError::Invalid {
                var: "ENVIRONMENT",
                reason: format!("{trimmed:?} must be alphanumeric, '-', or '_' only"),
            });
        }
        Ok(Environment(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment(DEFAULT_ENVIRONMENT.to_string())
    }
}

/// Validated application configuration, assembled once from environment
/// variables at process startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub data_root: PathBuf,
    pub graph_url: String,
    pub graph_user: String,
    pub graph_password: String,
    pub llm_api_key: String,
    pub log_level: String,
}

impl AppConfig {
    /// Reads and validates `ENVIRONMENT`, `DATA_ROOT`, `GRAPH_URL`,
    /// `GRAPH_USER`, `GRAPH_PASSWORD`, `LLM_API_KEY`, and `LOG_LEVEL`.
    /// `ENVIRONMENT` defaults to `test`, `DATA_ROOT` to `./data`, and
    /// `LOG_LEVEL` to `info`; everything else is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("ENVIRONMENT") {
            Ok(raw) => Environment::parse(&raw)?,
            Err(_) => Environment::default(),
        };

        let data_root = env::var("DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let graph_url = require("GRAPH_URL")?;
        let graph_user = require("GRAPH_USER")?;
        let graph_password = require("GRAPH_PASSWORD")?;
        let llm_api_key = require("LLM_API_KEY")?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        validate_log_level(&log_level)?;

        Ok(Self {
            environment,
            data_root,
            graph_url,
            graph_user,
            graph_password,
            llm_api_key,
            log_level,
        })
    }

    /// Path to this environment's journal file:
    /// `{data_root}/state/pipeline_state_{environment}.jsonl`.
    pub fn journal_path(&self) -> PathBuf {
        self.data_root
            .join("state")
            .join(format!("pipeline_state_{}.jsonl", self.environment.as_str()))
    }

    /// Root directory for per-stage artifact files: `{data_root}/{environment}`,
    /// under which `FileArtifactStore` nests `{speaker}/{stage}/{content_type}/{id}.json`.
    pub fn artifacts_root(&self) -> PathBuf {
        self.data_root.join(self.environment.as_str())
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing(var))
}

fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    const VALID: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if VALID.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var: "LOG_LEVEL",
            reason: format!("{level:?} is not one of {VALID:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_arbitrary_namespaces_case_insensitively() {
        assert_eq!(Environment::parse("PROD").unwrap().as_str(), "prod");
        assert_eq!(Environment::parse("staging").unwrap().as_str(), "staging");
        assert_eq!(Environment::parse("qa-2").unwrap().as_str(), "qa-2");
    }

    #[test]
    fn environment_rejects_empty_value() {
        assert!(Environment::parse("").is_err());
        assert!(Environment::parse("   ").is_err());
    }

    #[test]
    fn environment_rejects_path_unsafe_characters() {
        assert!(Environment::parse("../etc").is_err());
        assert!(Environment::parse("a/b").is_err());
    }

    #[test]
    fn environment_defaults_to_test() {
        assert_eq!(Environment::default().as_str(), "test");
    }

    #[test]
    fn log_level_validation_accepts_known_levels_case_insensitively() {
        assert!(validate_log_level("INFO").is_ok());
        assert!(validate_log_level("debug").is_ok());
    }

    #[test]
    fn log_level_validation_rejects_unknown_level() {
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn journal_path_is_scoped_by_environment() {
        let config = AppConfig {
            environment: Environment::parse("staging").unwrap(),
            data_root: PathBuf::from("/data"),
            graph_url: String::new(),
            graph_user: String::new(),
            graph_password: String::new(),
            llm_api_key: String::new(),
            log_level: "info".to_string(),
        };
        assert_eq!(
            config.journal_path(),
            PathBuf::from("/data/state/pipeline_state_staging.jsonl")
        );
        assert_eq!(config.artifacts_root(), PathBuf::from("/data/staging"));
    }
}
