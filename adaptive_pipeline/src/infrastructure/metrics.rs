// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Metrics
//!
//! A `prometheus::Registry` carrying one counter vector (processed/
//! succeeded/failed, labeled by stage) and one duration histogram vector,
//! both labeled by `stage`. Intentionally small — no endpoint, no
//! concurrency gauges, no generic collector trait: §6's only observability
//! requirement beyond logs is per-stage counts and latency.

use adaptive_pipeline_domain::value_objects::Stage;
use prometheus::{HistogramVec, IntCounterVec, Opts, Registry};
use std::time::Instant;

pub struct StageMetrics {
    registry: Registry,
    processed: IntCounterVec,
    succeeded: IntCounterVec,
    failed: IntCounterVec,
    duration_seconds: HistogramVec,
}

impl StageMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let processed = IntCounterVec::new(
            Opts::new("discoursekg_stage_items_processed_total", "Items attempted per stage"),
            &["stage"],
        )
        .expect("static metric definition is valid");
        let succeeded = IntCounterVec::new(
            Opts::new("discoursekg_stage_items_succeeded_total", "Items that completed a stage"),
            &["stage"],
        )
        .expect("static metric definition is valid");
        let failed = IntCounterVec::new(
            Opts::new("discoursekg_stage_items_failed_total", "Items that failed a stage"),
            &["stage"],
        )
        .expect("static metric definition is valid");
        let duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "discoursekg_stage_duration_seconds",
                "Wall-clock time to process one item through one stage",
            ),
            &["stage"],
        )
        .expect("static metric definition is valid");

        registry.register(Box::new(processed.clone())).expect("metric registration is infallible here");
        registry.register(Box::new(succeeded.clone())).expect("metric registration is infallible here");
        registry.register(Box::new(failed.clone())).expect("metric registration is infallible here");
        registry
            .register(Box::new(duration_seconds.clone()))
            .expect("metric registration is infallible here");

        Self { registry, processed, succeeded, failed, duration_seconds }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_attempt(&self, stage: Stage) -> StageTimer<'_> {
        self.processed.with_label_values(&[stage.as_str()]).inc();
        StageTimer { metrics: self, stage, started_at: Instant::now() }
    }

    fn record_success(&self, stage: Stage, elapsed_secs: f64) {
        self.succeeded.with_label_values(&[stage.as_str()]).inc();
        self.duration_seconds.with_label_values(&[stage.as_str()]).observe(elapsed_secs);
    }

    fn record_failure(&self, stage: Stage, elapsed_secs: f64) {
        self.failed.with_label_values(&[stage.as_str()]).inc();
        self.duration_seconds.with_label_values(&[stage.as_str()]).observe(elapsed_secs);
    }
}

impl Default for StageMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Started by `record_attempt`; call `succeeded()` or `failed()` exactly
/// once to record the outcome and elapsed duration together.
pub struct StageTimer<'a> {
    metrics: &'a StageMetrics,
    stage: Stage,
    started_at: Instant,
}

impl StageTimer<'_> {
    pub fn succeeded(self) {
        self.metrics.record_success(self.stage, self.started_at.elapsed().as_secs_f64());
    }

    pub fn failed(self) {
        self.metrics.record_failure(self.stage, self.started_at.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_attempt_increments_the_processed_counter() {
        let metrics = StageMetrics::new();
        let timer = metrics.record_attempt(Stage::Discover);
        timer.succeeded();

        let families = metrics.registry().gather();
        let processed = families
            .iter()
            .find(|f| f.name() == "discoursekg_stage_items_processed_total")
            .expect("processed metric registered");
        assert_eq!(processed.get_metric()[0].get_counter().value(), 1.0);
    }

    #[test]
    fn failed_timer_increments_failed_not_succeeded() {
        let metrics = StageMetrics::new();
        metrics.record_attempt(Stage::Scrape).failed();

        let families = metrics.registry().gather();
        let failed = families
            .iter()
            .find(|f| f.name() == "discoursekg_stage_items_failed_total")
            .expect("failed metric registered");
        assert_eq!(failed.get_metric()[0].get_counter().value(), 1.0);

        let succeeded = families
            .iter()
            .find(|f| f.name() == "discoursekg_stage_items_succeeded_total")
            .expect("succeeded metric registered");
        assert!(succeeded.get_metric().is_empty());
    }
}
