// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! The CLI exit code contract (§6):
//!
//! - **0** — every item touched by the invocation succeeded, or there
//!   were no items ready for the stage.
//! - **1** — at least one item failed; the Journal already recorded each
//!   failure and a later invocation can retry it.
//! - **2** — an operator error: bad arguments, missing configuration, or
//!   a failure that happened before any item was touched.

use adaptive_pipeline_domain::repositories::StageReport;
use adaptive_pipeline_domain::DiscourseError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    #[default]
    Success = 0,
    ItemFailures = 1,
    OperatorError = 2,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "all items succeeded or no items were ready",
            ExitCode::ItemFailures => "one or more items failed",
            ExitCode::OperatorError => "invalid arguments or configuration",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}

/// Maps a `DiscourseError` surfaced before (or independent of) any
/// per-item attempt onto an exit code. Every domain error becomes
/// `OperatorError` here: a `StageReport` failure entry, not a returned
/// `Err`, is how a single item's failure is supposed to reach the CLI
/// (see `result_to_exit_code`), so an `Err` reaching this function at all
/// means something operator-addressable went wrong (bad config, a
/// journal that could not be opened, and so on).
pub fn map_error_to_exit_code(error: &DiscourseError) -> ExitCode {
    match error {
        DiscourseError::InvalidConfiguration(_) => ExitCode::OperatorError,
        _ => ExitCode::OperatorError,
    }
}

fn resolve(result: &Result<StageReport, DiscourseError>) -> ExitCode {
    match result {
        Ok(report) if report.all_succeeded() => ExitCode::Success,
        Ok(_) => ExitCode::ItemFailures,
        Err(e) => map_error_to_exit_code(e),
    }
}

/// Maps the outcome of a `run` invocation to a process exit code: `Ok`
/// reports item-level success via `StageReport::all_succeeded`, `Err`
/// means the invocation failed before producing a report at all.
pub fn result_to_exit_code(result: Result<StageReport, DiscourseError>) -> std::process::ExitCode {
    resolve(&result).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values_match_the_cli_contract() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ItemFailures.as_i32(), 1);
        assert_eq!(ExitCode::OperatorError.as_i32(), 2);
    }

    #[test]
    fn is_success_only_true_for_success() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::ItemFailures.is_success());
        assert!(!ExitCode::OperatorError.is_success());
    }

    #[test]
    fn report_with_no_failures_maps_to_success() {
        let report = StageReport { items_total: 2, succeeded: 2, failed: 0, ..Default::default() };
        assert_eq!(resolve(&Ok(report)), ExitCode::Success);
    }

    #[test]
    fn report_with_any_failure_maps_to_item_failures() {
        let report = StageReport { items_total: 2, succeeded: 1, failed: 1, ..Default::default() };
        assert_eq!(resolve(&Ok(report)), ExitCode::ItemFailures);
    }

    #[test]
    fn domain_error_maps_to_operator_error() {
        let err = DiscourseError::invalid_config("missing GRAPH_URL");
        assert_eq!(map_error_to_exit_code(&err), ExitCode::OperatorError);
        assert_eq!(resolve(&Err(err)), ExitCode::OperatorError);
    }

    #[test]
    fn empty_report_maps_to_success() {
        assert_eq!(resolve(&Ok(StageReport::default())), ExitCode::Success);
    }
}
