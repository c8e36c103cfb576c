// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Presentation Layer
//!
//! CLI argument parsing and validation live in `adaptive_pipeline_bootstrap`;
//! what's left for this layer is formatting the result of a command for a
//! terminal. Two shapes come out of `application::commands`: a `StageReport`
//! from a `run` command, and a `StatusReport` from `status` — both get a
//! plain-text renderer here rather than a `Debug` dump.

use crate::application::commands::StatusReport;
use adaptive_pipeline_domain::repositories::StageReport;
use std::fmt::Write as _;

/// Renders a `StageReport` the way `run discover|scrape|summarize|categorize|graph`
/// prints its outcome: totals, then one line per failure.
pub fn format_stage_report(stage_name: &str, report: &StageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{stage_name}: {} total, {} succeeded, {} failed",
        report.items_total, report.succeeded, report.failed
    );
    if !report.failures.is_empty() {
        let _ = writeln!(out, "failures:");
        for (id, error) in &report.failures {
            let _ = writeln!(out, "  {id}: {error}");
        }
    }
    out
}

/// Renders a `StatusReport` the way `status` prints: one line per
/// `next_stage` group, then the failing items' error messages when any were
/// included.
pub fn format_status_report(report: &StatusReport) -> String {
    let mut out = String::new();
    if report.counts.is_empty() {
        let _ = writeln!(out, "no matching items");
    }
    for count in &report.counts {
        let _ = writeln!(out, "{}: {}", count.stage, count.count);
    }
    if !report.failed_items.is_empty() {
        let _ = writeln!(out, "failed items:");
        for item in &report.failed_items {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                item.id,
                item.source_url,
                item.error_message.as_deref().unwrap_or("")
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::StageCount;
    use adaptive_pipeline_domain::value_objects::{ContentType, ItemId};
    use adaptive_pipeline_domain::PipelineState;

    #[test]
    fn stage_report_with_no_failures_has_no_failures_section() {
        let report = StageReport { items_total: 2, succeeded: 2, failed: 0, ..Default::default() };
        let rendered = format_stage_report("scrape", &report);
        assert!(rendered.contains("2 total, 2 succeeded, 0 failed"));
        assert!(!rendered.contains("failures:"));
    }

    #[test]
    fn stage_report_with_failures_lists_each_one() {
        let id = ItemId::new();
        let report = StageReport {
            items_total: 1,
            succeeded: 0,
            failed: 1,
            failures: vec![(id, "timeout".to_string())],
            ..Default::default()
        };
        let rendered = format_stage_report("scrape", &report);
        assert!(rendered.contains(&id.to_string()));
        assert!(rendered.contains("timeout"));
    }

    #[test]
    fn status_report_with_no_items_says_so() {
        let rendered = format_status_report(&StatusReport::default());
        assert!(rendered.contains("no matching items"));
    }

    #[test]
    fn status_report_lists_failed_items_with_their_error_message() {
        let mut item = PipelineState::new_discovered(
            ItemId::new(),
            "jane-doe",
            "https://example.com/a",
            ContentType::Speech,
            None,
            None,
        );
        item.error_message = Some("boom".to_string());

        let report = StatusReport {
            counts: vec![StageCount { stage: "discover".into(), count: 1 }],
            failed_items: vec![item],
        };
        let rendered = format_status_report(&report);
        assert!(rendered.contains("discover: 1"));
        assert!(rendered.contains("boom"));
    }
}
