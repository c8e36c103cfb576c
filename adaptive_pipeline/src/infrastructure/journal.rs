// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # JSONL State Journal
//!
//! `JsonlStateJournal` keeps the entire journal resident as a
//! `HashMap<ItemId, PipelineState>`, built at startup by reading the journal
//! file one line at a time, and rewrites the whole file on every mutation
//! (write to a `.tmp` sibling, then `rename` over the real path — atomic on
//! the same filesystem). A secondary `source_url -> ItemId` index enforces
//! uniqueness among non-invalidated records without a linear scan.
//!
//! A `tokio::sync::RwLock` around both indices gives the concurrent reads
//! (`get`, `items_ready_for`, `find_by_source_url`) the Runtime's fan-out
//! issues during a stage run shared access, while every mutation takes the
//! exclusive write lock (§5's linearizability requirement).

use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{StageMetadata, StateJournal};
use adaptive_pipeline_domain::value_objects::{ItemId, Stage};
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

struct Index {
    by_id: HashMap<ItemId, PipelineState>,
    by_source_url: HashMap<String, ItemId>,
}

impl Index {
    fn rebuild_source_url_index(&mut self) {
        self.by_source_url.clear();
        for state in self.by_id.values() {
            if !state.invalidated {
                self.by_source_url.insert(state.source_url.clone(), state.id);
            }
        }
    }
}

pub struct JsonlStateJournal {
    path: PathBuf,
    index: RwLock<Index>,
}

impl JsonlStateJournal {
    /// Opens (or creates) the journal at `path`, reading every existing
    /// line into the in-memory index.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DiscourseError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut by_id = HashMap::new();
        if path.exists() {
            let file = std::fs::File::open(&path)?;
            for line in std::io::BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let state: PipelineState = serde_json::from_str(&line)?;
                by_id.insert(state.id, state);
            }
        }

        let mut index = Index { by_id, by_source_url: HashMap::new() };
        index.rebuild_source_url_index();

        Ok(Self { path, index: RwLock::new(index) })
    }

    fn rewrite(path: &Path, index: &Index) -> Result<(), DiscourseError> {
        let tmp_path = path.with_extension("jsonl.tmp");
        {
            let mut tmp = std::fs::File::create(&tmp_path)?;
            for state in index.by_id.values() {
                let line = serde_json::to_string(state)?;
                writeln!(tmp, "{line}")?;
            }
            tmp.flush()?;
        }
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl StateJournal for JsonlStateJournal {
    async fn create(&self, state: PipelineState) -> Result<(), DiscourseError> {
        let mut index = self.index.write().await;

        if index.by_id.contains_key(&state.id) {
            return Err(DiscourseError::internal_error(format!(
                "item {} already exists in the journal",
                state.id
            )));
        }
        if index.by_source_url.contains_key(&state.source_url) {
            return Err(DiscourseError::DuplicateSourceUrl(state.source_url.clone()));
        }

        index.by_source_url.insert(state.source_url.clone(), state.id);
        index.by_id.insert(state.id, state);
        Self::rewrite(&self.path, &index)
    }

    async fn get(&self, id: ItemId) -> Result<PipelineState, DiscourseError> {
        let index = self.index.read().await;
        index
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| DiscourseError::ItemNotFound(id.to_string()))
    }

    async fn items_ready_for(&self, stage: Stage) -> Result<Vec<PipelineState>, DiscourseError> {
        let index = self.index.read().await;
        let mut items: Vec<PipelineState> = index
            .by_id
            .values()
            .filter(|s| !s.invalidated && s.next_stage == Some(stage))
            .cloned()
            .collect();
        items.sort_by_key(|s| s.created_at);
        Ok(items)
    }

    async fn update_on_success(
        &self,
        id: ItemId,
        stage: Stage,
        artifact_path: String,
        metadata: StageMetadata,
    ) -> Result<(), DiscourseError> {
        let mut index = self.index.write().await;
        let state = index
            .by_id
            .get_mut(&id)
            .ok_or_else(|| DiscourseError::ItemNotFound(id.to_string()))?;

        if state.next_stage != Some(stage) {
            return Err(DiscourseError::internal_error(format!(
                "item {id} is not awaiting stage {stage} (next_stage = {:?})",
                state.next_stage
            )));
        }

        state.file_paths.insert(stage, artifact_path);
        state.latest_completed_stage = Some(stage);
        state.next_stage = stage.next();
        if let Some(title) = metadata.title {
            state.title = Some(title);
        }
        if let Some(content_date) = metadata.content_date {
            state.content_date = Some(content_date);
        }
        if let Some(content_type) = metadata.content_type {
            state.content_type = content_type;
        }
        state.error_message = None;
        state.failed_output = None;
        state.retry_count = 0;
        state.updated_at = Utc::now();

        state.validate_invariants()?;
        Self::rewrite(&self.path, &index)
    }

    async fn update_on_failure(
        &self,
        id: ItemId,
        stage: Stage,
        error: String,
        failed_output: Option<String>,
    ) -> Result<(), DiscourseError> {
        let mut index = self.index.write().await;
        let state = index
            .by_id
            .get_mut(&id)
            .ok_or_else(|| DiscourseError::ItemNotFound(id.to_string()))?;

        if state.next_stage != Some(stage) {
            return Err(DiscourseError::internal_error(format!(
                "item {id} is not awaiting stage {stage} (next_stage = {:?})",
                state.next_stage
            )));
        }

        state.error_message = Some(error);
        state.failed_output =
            failed_output.map(|output| PipelineState::cap_failed_output(&output));
        state.retry_count += 1;
        state.updated_at = Utc::now();

        Self::rewrite(&self.path, &index)
    }

    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<PipelineState>, DiscourseError> {
        let index = self.index.read().await;
        Ok(index
            .by_source_url
            .get(source_url)
            .and_then(|id| index.by_id.get(id))
            .cloned())
    }

    async fn invalidate(&self, id: ItemId) -> Result<(), DiscourseError> {
        let mut index = self.index.write().await;
        let state = index
            .by_id
            .get_mut(&id)
            .ok_or_else(|| DiscourseError::ItemNotFound(id.to_string()))?;
        state.invalidated = true;
        state.updated_at = Utc::now();
        let source_url = state.source_url.clone();
        index.by_source_url.remove(&source_url);
        Self::rewrite(&self.path, &index)
    }

    async fn all(&self) -> Result<Vec<PipelineState>, DiscourseError> {
        let index = self.index.read().await;
        Ok(index.by_id.values().cloned().collect())
    }
}
