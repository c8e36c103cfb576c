// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Logging
//!
//! Structured logging for the runtime: one `tracing_subscriber` init called
//! once from the composition root, honoring `LOG_LEVEL` via `EnvFilter`, and
//! a `stage_span` helper so every processor attempt logs under a span
//! carrying `stage`, `item_id`, and `speaker` (§4.3's per-item, per-stage
//! observability requirement).

use adaptive_pipeline_domain::value_objects::{ItemId, Stage};
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global `tracing` subscriber. `log_level` is
/// `AppConfig::log_level` (already validated as one of trace/debug/info/
/// warn/error); an explicit `RUST_LOG` in the environment still takes
/// precedence, matching `EnvFilter`'s normal layering.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).compact().init();
}

/// Span every stage attempt runs under, so `tracing::info!`/`warn!`/
/// `error!` calls inside a processor are automatically tagged with which
/// item and stage produced them.
pub fn stage_span(stage: Stage, item_id: ItemId, speaker: &str) -> tracing::Span {
    tracing::info_span!("stage_attempt", stage = %stage, item_id = %item_id, speaker = %speaker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_span_carries_the_expected_fields() {
        let span = stage_span(Stage::Scrape, ItemId::new(), "jane-doe");
        assert_eq!(span.metadata().unwrap().name(), "stage_attempt");
    }
}
