// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Commands
//!
//! One async function per `ValidatedCommand` variant from
//! `adaptive_pipeline_bootstrap::cli`. Each is a thin composition of
//! `PipelineRuntime`/`StateJournal` calls against the ports assembled into a
//! `CommandContext` by the composition root (`main.rs`) — no business logic
//! lives here, only orchestration and CLI-facing parameter parsing (date
//! strings, item id strings).

use crate::infrastructure::config::RuntimeConfig;
use crate::infrastructure::metrics::StageMetrics;
use crate::infrastructure::runtime::PipelineRuntime;
use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{
    ArtifactStore, DiscoverParams, DiscoverProcessor, GraphStore, StageProcessor, StageReport, StateJournal,
};
use adaptive_pipeline_domain::value_objects::ItemId;
use adaptive_pipeline_domain::DiscourseError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Everything a command function needs: the Journal and Artifact Store
/// directly (for commands that don't run a stage, like `status` and
/// `invalidate`), the per-stage processors, and enough to build a
/// `PipelineRuntime` tuned to this invocation's `--fanout`/`--timeout`.
pub struct CommandContext {
    pub journal: Arc<dyn StateJournal>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub graph_store: Arc<dyn GraphStore>,
    pub metrics: Arc<StageMetrics>,
    pub default_runtime_config: RuntimeConfig,
    pub discover_processor: Arc<dyn DiscoverProcessor>,
    pub scrape_processor: Arc<dyn StageProcessor>,
    pub summarize_processor: Arc<dyn StageProcessor>,
    pub categorize_processor: Arc<dyn StageProcessor>,
    pub graph_processor: Arc<dyn StageProcessor>,
}

impl CommandContext {
    /// Builds a `PipelineRuntime` for one invocation, applying the CLI's
    /// `--fanout`/`--timeout` overrides where given and falling back to
    /// `default_runtime_config` otherwise.
    fn runtime(&self, fanout: Option<usize>, timeout_secs: Option<u64>) -> Result<PipelineRuntime, DiscourseError> {
        let config = if fanout.is_none() && timeout_secs.is_none() {
            self.default_runtime_config
        } else {
            RuntimeConfig::resolve(
                Some(fanout.unwrap_or(self.default_runtime_config.fanout.get())),
                Some(timeout_secs.unwrap_or(self.default_runtime_config.stage_timeout.as_secs())),
            )?
        };
        Ok(PipelineRuntime::new(
            Arc::clone(&self.journal),
            Arc::clone(&self.artifacts),
            Arc::clone(&self.metrics),
            config,
        ))
    }
}

fn parse_date(label: &'static str, raw: &str) -> Result<NaiveDate, DiscourseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| DiscourseError::validation_error(format!("invalid {label} date {raw:?}: {e}")))
}

/// `run discover --speaker S --from YYYY-MM-DD --to YYYY-MM-DD` (§6).
pub async fn run_discover(
    ctx: &CommandContext,
    speaker: String,
    from: String,
    to: String,
) -> Result<StageReport, DiscourseError> {
    let start_date = parse_date("from", &from)?;
    let end_date = parse_date("to", &to)?;
    if end_date < start_date {
        return Err(DiscourseError::validation_error(format!(
            "--to {to} is before --from {from}"
        )));
    }

    let params = DiscoverParams { speaker, start_date, end_date };
    let runtime = ctx.runtime(None, None)?;
    runtime.run_discover(params, ctx.discover_processor.as_ref()).await
}

/// `run scrape [--fanout N] [--timeout SECS]` (§6).
pub async fn run_scrape(
    ctx: &CommandContext,
    fanout: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<StageReport, DiscourseError> {
    let runtime = ctx.runtime(fanout, timeout_secs)?;
    runtime.run_stage(ctx.scrape_processor.as_ref()).await
}

/// `run summarize [--fanout N] [--timeout SECS]` (§6).
pub async fn run_summarize(
    ctx: &CommandContext,
    fanout: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<StageReport, DiscourseError> {
    let runtime = ctx.runtime(fanout, timeout_secs)?;
    runtime.run_stage(ctx.summarize_processor.as_ref()).await
}

/// `run categorize [--fanout N] [--timeout SECS]` (§6).
pub async fn run_categorize(
    ctx: &CommandContext,
    fanout: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<StageReport, DiscourseError> {
    let runtime = ctx.runtime(fanout, timeout_secs)?;
    runtime.run_stage(ctx.categorize_processor.as_ref()).await
}

/// `run graph [--fanout N] [--timeout SECS]` (§6).
pub async fn run_graph(
    ctx: &CommandContext,
    fanout: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<StageReport, DiscourseError> {
    let runtime = ctx.runtime(fanout, timeout_secs)?;
    runtime.run_stage(ctx.graph_processor.as_ref()).await
}

/// One group in a `status` report: how many non-invalidated items are
/// sitting at a given `next_stage` (`"complete"` for items with none).
#[derive(Debug, Clone, PartialEq)]
pub struct StageCount {
    pub stage: String,
    pub count: usize,
}

/// Result of the `status` command (§6): counts grouped by `next_stage`,
/// plus the individual failing records so the CLI can print their error
/// messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    pub counts: Vec<StageCount>,
    pub failed_items: Vec<PipelineState>,
}

fn next_stage_label(state: &PipelineState) -> String {
    match state.next_stage {
        Some(stage) => stage.as_str().to_string(),
        None => "complete".to_string(),
    }
}

/// `status [--stage S] [--failed]` (§6): counts non-invalidated items by
/// `next_stage`, optionally restricted to one stage (or `"complete"`) and/or
/// to items currently carrying an `error_message`.
pub async fn status(
    ctx: &CommandContext,
    stage_filter: Option<String>,
    failed_only: bool,
) -> Result<StatusReport, DiscourseError> {
    let all = ctx.journal.all().await?;

    let mut filtered: Vec<PipelineState> = all.into_iter().filter(|s| !s.invalidated).collect();
    if let Some(ref stage) = stage_filter {
        filtered.retain(|s| &next_stage_label(s) == stage);
    }
    if failed_only {
        filtered.retain(|s| s.error_message.is_some());
    }

    let mut tallies: HashMap<String, usize> = HashMap::new();
    for state in &filtered {
        *tallies.entry(next_stage_label(state)).or_insert(0) += 1;
    }
    let mut counts: Vec<StageCount> = tallies.into_iter().map(|(stage, count)| StageCount { stage, count }).collect();
    counts.sort_by(|a, b| a.stage.cmp(&b.stage));

    let failed_items = filtered.into_iter().filter(|s| s.error_message.is_some()).collect();

    Ok(StatusReport { counts, failed_items })
}

/// `invalidate --id X` (§6): excludes a record from future stage runs
/// without deleting it, freeing its `source_url` for rediscovery.
pub async fn invalidate(ctx: &CommandContext, id: String) -> Result<(), DiscourseError> {
    let item_id = ItemId::from_str(&id)
        .map_err(|e| DiscourseError::validation_error(format!("invalid item id {id:?}: {e}")))?;
    ctx.journal.invalidate(item_id).await
}
