// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Runtime
//!
//! Drives one stage across all ready items per invocation (§4.3). This is
//! the one place that knows how to turn a `StageProcessor`/`DiscoverProcessor`
//! into Journal and Artifact Store calls — processors themselves never touch
//! either, which is what keeps them unit-testable in isolation (see
//! `infrastructure::graph_builder` and `infrastructure::processors::*`).
//!
//! `run_stage` bounds concurrency with a `tokio::sync::Semaphore` sized by
//! `RuntimeConfig.fanout` and applies `RuntimeConfig.stage_timeout` to each
//! item via `tokio::time::timeout`, mirroring the worker-per-item model in
//! §5. A Journal write failure (as opposed to a processor failure) is
//! treated as fatal to the whole invocation per §4.1's failure semantics:
//! it is logged and propagated rather than recorded as an item failure.

use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{
    ArtifactStore, DiscoverParams, DiscoverProcessor, StageProcessor, StageReport, StateJournal,
};
use adaptive_pipeline_domain::value_objects::{ItemId, Stage};
use adaptive_pipeline_domain::DiscourseError;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{error, warn};

use crate::infrastructure::config::RuntimeConfig;
use crate::infrastructure::metrics::StageMetrics;

/// Outcome of driving a single item through one stage attempt.
enum ItemOutcome {
    Succeeded(Duration),
    Failed(ItemId, String),
}

pub struct PipelineRuntime {
    journal: Arc<dyn StateJournal>,
    artifacts: Arc<dyn ArtifactStore>,
    metrics: Arc<StageMetrics>,
    config: RuntimeConfig,
}

impl PipelineRuntime {
    pub fn new(
        journal: Arc<dyn StateJournal>,
        artifacts: Arc<dyn ArtifactStore>,
        metrics: Arc<StageMetrics>,
        config: RuntimeConfig,
    ) -> Self {
        Self { journal, artifacts, metrics, config }
    }

    /// Runs `discover`: asks `processor` for every item it can find for
    /// `params`, inserts each as a new Journal record, and writes its
    /// initial artifact. Duplicates by `source_url` are silently skipped
    /// (§4.3, §7 `DUPLICATE_SOURCE_URL`) rather than counted as failures —
    /// re-running discover over an overlapping date range is a no-op for
    /// items already known.
    pub async fn run_discover(
        &self,
        params: DiscoverParams,
        processor: &dyn DiscoverProcessor,
    ) -> Result<StageReport, DiscourseError> {
        let stage = Stage::Discover;
        let discovered = processor.discover(&params).await?;

        let mut report = StageReport::default();

        for item in discovered {
            let timer = self.metrics.record_attempt(stage);
            let started_at = Instant::now();

            let id = ItemId::new();
            let state = PipelineState::new_discovered(
                id,
                params.speaker.clone(),
                item.source_url.clone(),
                item.content_type,
                item.title.clone(),
                item.content_date,
            );

            match self.journal.create(state.clone()).await {
                Ok(()) => {}
                Err(DiscourseError::DuplicateSourceUrl(url)) => {
                    warn!(source_url = %url, "discover skipped duplicate source_url");
                    timer.succeeded();
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "journal write failed while recording a discovered item");
                    timer.failed();
                    return Err(e);
                }
            }

            let path = match self
                .artifacts
                .save(id, &params.speaker, stage, item.content_type, item.artifact.clone())
                .await
            {
                Ok(path) => path,
                Err(e) => {
                    timer.failed();
                    return Err(e);
                }
            };

            let metadata = adaptive_pipeline_domain::repositories::StageMetadata {
                title: item.title.clone(),
                content_date: item.content_date,
                content_type: Some(item.content_type),
            };
            if let Err(e) = self.journal.update_on_success(id, stage, path, metadata).await {
                error!(error = %e, "journal write failed while recording a discovered item's artifact path");
                timer.failed();
                return Err(e);
            }

            timer.succeeded();
            report.items_total += 1;
            report.succeeded += 1;
            report.durations.push(started_at.elapsed());
        }

        Ok(report)
    }

    /// Runs one stage across every item currently ready for it (§4.3): loads
    /// each item's required prior artifacts, invokes `processor` with a
    /// fan-out of up to `RuntimeConfig.fanout` items concurrently, and
    /// records the outcome of each attempt back to the Journal.
    pub async fn run_stage(&self, processor: &dyn StageProcessor) -> Result<StageReport, DiscourseError> {
        let stage = processor.stage();
        let items = self.journal.items_ready_for(stage).await?;
        let semaphore = Arc::new(Semaphore::new(self.config.fanout.get()));

        let outcomes: Vec<Result<ItemOutcome, DiscourseError>> = stream::iter(items)
            .map(|item| {
                let semaphore = Arc::clone(&semaphore);
                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore is never closed");
                    self.run_one_item(stage, processor, item).await
                }
            })
            .buffer_unordered(self.config.fanout.get())
            .collect()
            .await;

        let mut report = StageReport::default();
        for outcome in outcomes {
            match outcome? {
                ItemOutcome::Succeeded(elapsed) => {
                    report.items_total += 1;
                    report.succeeded += 1;
                    report.durations.push(elapsed);
                }
                ItemOutcome::Failed(id, error) => {
                    report.items_total += 1;
                    report.failed += 1;
                    report.failures.push((id, error));
                }
            }
        }

        Ok(report)
    }

    /// Drives a single item through `stage`. A processor error or a
    /// cancelled timeout is recorded as an item failure and returned as
    /// `Ok(ItemOutcome::Failed(..))`; a Journal write failure is a fatal
    /// `Err` per §4.1 (it means the invocation's bookkeeping can no longer
    /// be trusted, not that this one item is bad).
    async fn run_one_item(
        &self,
        stage: Stage,
        processor: &dyn StageProcessor,
        item: PipelineState,
    ) -> Result<ItemOutcome, DiscourseError> {
        let id = item.id;
        let span = crate::infrastructure::logging::stage_span(stage, id, &item.speaker);
        let _entered = span.enter();

        let timer = self.metrics.record_attempt(stage);
        let started_at = Instant::now();

        let prior_artifacts = match self.load_prior_artifacts(processor, &item).await {
            Ok(artifacts) => artifacts,
            Err(e) => {
                timer.failed();
                return self.record_failure(id, stage, e).await;
            }
        };

        let attempt = tokio::time::timeout(self.config.stage_timeout, processor.process(&item, &prior_artifacts)).await;

        let result = match attempt {
            Ok(inner) => inner,
            Err(_elapsed) => Err(DiscourseError::Timeout),
        };

        match result {
            Ok(stage_result) => {
                let path = match self
                    .artifacts
                    .save(id, &item.speaker, stage, item.content_type, stage_result.artifact)
                    .await
                {
                    Ok(path) => path,
                    Err(e) => {
                        timer.failed();
                        return self.record_failure(id, stage, e).await;
                    }
                };

                if let Err(e) = self
                    .journal
                    .update_on_success(id, stage, path, stage_result.metadata)
                    .await
                {
                    error!(item_id = %id, %stage, error = %e, "journal write failed recording stage success");
                    timer.failed();
                    return Err(e);
                }

                timer.succeeded();
                Ok(ItemOutcome::Succeeded(started_at.elapsed()))
            }
            Err(e) => {
                timer.failed();
                self.record_failure(id, stage, e).await
            }
        }
    }

    async fn record_failure(
        &self,
        id: ItemId,
        stage: Stage,
        error: DiscourseError,
    ) -> Result<ItemOutcome, DiscourseError> {
        let message = error.to_string();
        if let Err(e) = self.journal.update_on_failure(id, stage, message.clone(), None).await {
            error!(item_id = %id, %stage, error = %e, "journal write failed recording stage failure");
            return Err(e);
        }
        Ok(ItemOutcome::Failed(id, message))
    }

    async fn load_prior_artifacts(
        &self,
        processor: &dyn StageProcessor,
        item: &PipelineState,
    ) -> Result<HashMap<String, serde_json::Value>, DiscourseError> {
        let mut artifacts = HashMap::new();
        for &prior_stage in processor.required_prior_stages() {
            let path = item.file_paths.get(&prior_stage).ok_or_else(|| {
                DiscourseError::internal_error(format!(
                    "item {} is missing its {prior_stage} artifact path, required by {}",
                    item.id,
                    processor.stage()
                ))
            })?;
            let value = self.artifacts.load(path).await?;
            artifacts.insert(prior_stage.as_str().to_string(), value);
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::artifact_store::FileArtifactStore;
    use crate::infrastructure::journal::JsonlStateJournal;
    use adaptive_pipeline_domain::entities::PipelineState;
    use adaptive_pipeline_domain::repositories::{DiscoveredItem, StageMetadata, StageResult};
    use adaptive_pipeline_domain::value_objects::{ContentType, FanOut};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AlwaysOneItemDiscoverProcessor;

    #[async_trait]
    impl DiscoverProcessor for AlwaysOneItemDiscoverProcessor {
        async fn discover(&self, params: &DiscoverParams) -> Result<Vec<DiscoveredItem>, DiscourseError> {
            Ok(vec![DiscoveredItem {
                source_url: format!("https://example.com/{}", params.speaker),
                content_type: ContentType::Speech,
                title: Some("Title".into()),
                content_date: Some(params.start_date),
                artifact: json!({"source_url": format!("https://example.com/{}", params.speaker)}),
            }])
        }
    }

    struct EchoProcessor {
        fail_count: AtomicUsize,
    }

    #[async_trait]
    impl StageProcessor for EchoProcessor {
        fn stage(&self) -> Stage {
            Stage::Scrape
        }

        fn required_prior_stages(&self) -> &'static [Stage] {
            &[Stage::Discover]
        }

        async fn process(
            &self,
            _state: &PipelineState,
            prior_artifacts: &HashMap<String, serde_json::Value>,
        ) -> Result<StageResult, DiscourseError> {
            if !prior_artifacts.contains_key(Stage::Discover.as_str()) {
                return Err(DiscourseError::internal_error("missing discover artifact"));
            }
            if self.fail_count.fetch_add(0, Ordering::SeqCst) > 0 {
                self.fail_count.fetch_sub(1, Ordering::SeqCst);
                return Err(DiscourseError::processor_error("forced failure"));
            }
            Ok(StageResult::with_metadata(
                json!({"full_text": "hi", "word_count": 1}),
                StageMetadata { title: None, content_date: None, content_type: None },
            ))
        }
    }

    async fn runtime_with_fanout(dir: &std::path::Path, fanout: usize) -> PipelineRuntime {
        let journal = Arc::new(JsonlStateJournal::open(dir.join("journal.jsonl")).await.unwrap());
        let artifacts = Arc::new(FileArtifactStore::new(dir));
        let metrics = Arc::new(StageMetrics::new());
        let config = RuntimeConfig { fanout: FanOut::new(fanout).unwrap(), ..RuntimeConfig::default() };
        PipelineRuntime::new(journal, artifacts, metrics, config)
    }

    #[tokio::test]
    async fn run_discover_creates_one_item_and_is_idempotent_on_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = runtime_with_fanout(dir.path(), 2).await;
        let params = DiscoverParams {
            speaker: "jane-doe".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };

        let report = runtime.run_discover(params.clone(), &AlwaysOneItemDiscoverProcessor).await.unwrap();
        assert_eq!(report.items_total, 1);
        assert_eq!(report.succeeded, 1);

        let rerun = runtime.run_discover(params, &AlwaysOneItemDiscoverProcessor).await.unwrap();
        assert_eq!(rerun.items_total, 0);
        assert_eq!(rerun.succeeded, 0);
    }

    #[tokio::test]
    async fn run_stage_advances_ready_items_and_is_a_no_op_after() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = runtime_with_fanout(dir.path(), 4).await;
        let params = DiscoverParams {
            speaker: "jane-doe".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        runtime.run_discover(params, &AlwaysOneItemDiscoverProcessor).await.unwrap();

        let processor = EchoProcessor { fail_count: AtomicUsize::new(0) };
        let report = runtime.run_stage(&processor).await.unwrap();
        assert_eq!(report.items_total, 1);
        assert_eq!(report.succeeded, 1);

        let rerun = runtime.run_stage(&processor).await.unwrap();
        assert_eq!(rerun.items_total, 0);
    }

    #[tokio::test]
    async fn failed_item_stays_ready_for_retry() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = runtime_with_fanout(dir.path(), 4).await;
        let params = DiscoverParams {
            speaker: "jane-doe".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        runtime.run_discover(params, &AlwaysOneItemDiscoverProcessor).await.unwrap();

        let processor = EchoProcessor { fail_count: AtomicUsize::new(1) };
        let report = runtime.run_stage(&processor).await.unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 0);

        let retry = runtime.run_stage(&processor).await.unwrap();
        assert_eq!(retry.succeeded, 1);
    }
}
