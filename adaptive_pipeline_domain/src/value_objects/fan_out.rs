// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Fan-Out Value Object
//!
//! `FanOut` is the validated worker count `F` the Runtime uses to bound how
//! many items a single `run_stage` invocation processes concurrently (§5).
//! It exists mainly to keep `0` and absurdly large values out of the
//! `tokio::Semaphore` constructor at the one call site that builds it.

use crate::DiscourseError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Default fan-out when a stage invocation doesn't override it.
pub const DEFAULT_FAN_OUT: usize = 4;

/// Upper bound past which a `--fanout` value is almost certainly a typo
/// rather than an intentional tuning choice.
const MAX_FAN_OUT: usize = 256;

/// A validated, non-zero worker count bounding per-invocation concurrency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FanOut(usize);

impl FanOut {
    /// Validates `workers` as a fan-out value.
    pub fn new(workers: usize) -> Result<Self, DiscourseError> {
        if workers == 0 {
            return Err(DiscourseError::invalid_config("fan-out must be at least 1"));
        }
        if workers > MAX_FAN_OUT {
            return Err(DiscourseError::invalid_config(format!(
                "fan-out {workers} exceeds the maximum of {MAX_FAN_OUT}"
            )));
        }
        Ok(Self(workers))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for FanOut {
    fn default() -> Self {
        Self(DEFAULT_FAN_OUT)
    }
}

impl Display for FanOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for FanOut {
    type Error = DiscourseError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
