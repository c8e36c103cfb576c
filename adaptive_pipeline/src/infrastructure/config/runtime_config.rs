// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Runtime Tuning
//!
//! `RuntimeConfig` holds the two knobs `PipelineRuntime::run_stage` (§4.3)
//! reads on every invocation: how many items to process concurrently, and
//! how long to give a single stage attempt before it counts as a timeout.
//! The CLI's `--fanout`/`--timeout` flags override these per run; absent
//! either, the defaults below apply.

use adaptive_pipeline_domain::FanOut;
use std::time::Duration;

pub const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    pub fanout: FanOut,
    pub stage_timeout: Duration,
}

impl RuntimeConfig {
    /// Builds a `RuntimeConfig` from the CLI's optional per-run overrides,
    /// applying `FanOut::default()` and `DEFAULT_STAGE_TIMEOUT_SECS` where
    /// the operator didn't specify one. `fanout` has already been
    /// range-checked by `SecureArgParser`/`validate_fanout` at CLI parse
    /// time, so only `FanOut::new`'s invariants can fail here.
    pub fn resolve(
        fanout: Option<usize>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, adaptive_pipeline_domain::DiscourseError> {
        let fanout = match fanout {
            Some(f) => FanOut::new(f)?,
            None => FanOut::default(),
        };
        let stage_timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_STAGE_TIMEOUT_SECS));
        Ok(Self { fanout, stage_timeout })
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fanout: FanOut::default(),
            stage_timeout: Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults_when_nothing_specified() {
        let config = RuntimeConfig::resolve(None, None).unwrap();
        assert_eq!(config.fanout, FanOut::default());
        assert_eq!(config.stage_timeout, Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS));
    }

    #[test]
    fn resolve_honors_explicit_overrides() {
        let config = RuntimeConfig::resolve(Some(8), Some(30)).unwrap();
        assert_eq!(config.fanout.get(), 8);
        assert_eq!(config.stage_timeout, Duration::from_secs(30));
    }

    #[test]
    fn resolve_rejects_invalid_fanout() {
        assert!(RuntimeConfig::resolve(Some(0), None).is_err());
    }
}
