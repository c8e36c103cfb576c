// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # State Journal Interface
//!
//! The durable, queryable store of every item's `PipelineState` (§4.1).
//! Exactly one implementation exists per environment at a time — the
//! trait exists so the Runtime and CLI can be tested against an in-memory
//! fake without touching disk.

use crate::entities::PipelineState;
use crate::repositories::stage_processor::StageMetadata;
use crate::value_objects::{ItemId, Stage};
use crate::DiscourseError;
use async_trait::async_trait;

/// Durable, queryable store of all `PipelineState` records. Sole writer to
/// the journal file for a given environment.
#[async_trait]
pub trait StateJournal: Send + Sync {
    /// Appends a new record. Fails with `DuplicateSourceUrl` if a
    /// non-invalidated record with the same `source_url` already exists,
    /// or `InternalError` if `id` is already present.
    async fn create(&self, state: PipelineState) -> Result<(), DiscourseError>;

    /// Returns the current record, or `ItemNotFound` if no such id exists.
    async fn get(&self, id: ItemId) -> Result<PipelineState, DiscourseError>;

    /// Every non-invalidated record with `next_stage = stage`, ordered by
    /// `created_at` ascending.
    async fn items_ready_for(&self, stage: Stage) -> Result<Vec<PipelineState>, DiscourseError>;

    /// Atomically advances an item past `stage`: sets
    /// `latest_completed_stage = stage`, advances `next_stage` to
    /// `stage.next()`, records `artifact_path` in `file_paths[stage]`,
    /// merges `metadata`, clears `error_message`/`failed_output`, zeros
    /// `retry_count`, and bumps `updated_at`.
    async fn update_on_success(
        &self,
        id: ItemId,
        stage: Stage,
        artifact_path: String,
        metadata: StageMetadata,
    ) -> Result<(), DiscourseError>;

    /// Leaves `next_stage` unchanged; sets `error_message`, optionally
    /// `failed_output`, increments `retry_count`, bumps `updated_at`.
    async fn update_on_failure(
        &self,
        id: ItemId,
        stage: Stage,
        error: String,
        failed_output: Option<String>,
    ) -> Result<(), DiscourseError>;

    /// Looks up a record by `source_url` among non-invalidated records, for
    /// dedup checks at discover time.
    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<PipelineState>, DiscourseError>;

    /// Marks a record excluded from future `items_ready_for` queries
    /// without deleting it.
    async fn invalidate(&self, id: ItemId) -> Result<(), DiscourseError>;

    /// Every record currently held, invalidated or not — used by `status`.
    async fn all(&self) -> Result<Vec<PipelineState>, DiscourseError>;
}

/// Summary the Runtime returns from one `run_stage` invocation (§4.3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub items_total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub durations: Vec<std::time::Duration>,
    pub failures: Vec<(ItemId, String)>,
}

impl StageReport {
    /// Exit-code-relevant summary: 0 if every item (or no items) succeeded,
    /// non-zero if any failed (§6's CLI exit code table).
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
