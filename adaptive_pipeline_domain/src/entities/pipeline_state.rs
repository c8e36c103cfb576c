// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # PipelineState Entity
//!
//! `PipelineState` is the unit of progress tracking for one communication:
//! the Journal's sole record type, mutated exclusively through
//! `StateJournal::update_on_success` / `update_on_failure`. Every other
//! component — Runtime, Artifact Store, Graph Builder — reads it but never
//! mutates it directly.
//!
//! ## Invariants
//!
//! - `latest_completed_stage` and `next_stage` are either both `Some` and
//!   adjacent in `STAGE_SEQUENCE`, or `next_stage` is `None` (the item is
//!   complete).
//! - If `next_stage = Some(S_k)`, `file_paths` has an entry for every stage
//!   strictly before `S_k` and none for `S_k` or later.
//! - `source_url` is unique across non-invalidated records sharing an
//!   environment (enforced by the Journal, not this type).
//!
//! `validate_invariants` checks the second rule; it's used by tests and by
//! the Journal after every mutation as a cheap consistency assertion.

use crate::value_objects::{ContentType, ItemId, Stage};
use crate::DiscourseError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum size, in bytes, that `failed_output` is truncated to before being
/// stored. Keeps a single pathological processor failure from bloating the
/// journal file (§9: "implementations must size-cap it (recommended 64
/// KiB)").
pub const FAILED_OUTPUT_CAP_BYTES: usize = 64 * 1024;

/// One record per item, the unit of progress tracking (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub id: ItemId,
    pub run_timestamp: DateTime<Utc>,
    pub speaker: String,
    pub content_type: ContentType,
    pub source_url: String,
    pub title: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub latest_completed_stage: Option<Stage>,
    pub next_stage: Option<Stage>,
    pub file_paths: HashMap<Stage, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processing_time_seconds: Option<f64>,
    pub retry_count: u32,
    pub error_message: Option<String>,
    pub failed_output: Option<String>,
    /// Set by `StateJournal::invalidate`. Distinct from `next_stage` being
    /// `None`, which also marks a normally-completed item — without this
    /// field the two are indistinguishable on journal reload, and an
    /// invalidated item's `source_url` would wrongly stay reserved.
    #[serde(default)]
    pub invalidated: bool,
}

impl PipelineState {
    /// Builds the initial record a discover processor creates for a newly
    /// found item: no stage has completed, `next_stage` is the first stage
    /// in the sequence.
    pub fn new_discovered(
        id: ItemId,
        speaker: impl Into<String>,
        source_url: impl Into<String>,
        content_type: ContentType,
        title: Option<String>,
        content_date: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            run_timestamp: now,
            speaker: speaker.into(),
            content_type,
            source_url: source_url.into(),
            title,
            content_date,
            latest_completed_stage: None,
            next_stage: Some(Stage::first()),
            file_paths: HashMap::new(),
            created_at: now,
            updated_at: now,
            processing_time_seconds: None,
            retry_count: 0,
            error_message: None,
            failed_output: None,
            invalidated: false,
        }
    }

    /// Whether this item has passed through every stage. An invalidated
    /// item is never complete, even if it reached `next_stage = None`
    /// before being invalidated.
    pub fn is_complete(&self) -> bool {
        self.next_stage.is_none() && !self.invalidated
    }

    /// Truncates `output` to `FAILED_OUTPUT_CAP_BYTES`, respecting UTF-8
    /// character boundaries, for storage as `failed_output`.
    pub fn cap_failed_output(output: &str) -> String {
        if output.len() <= FAILED_OUTPUT_CAP_BYTES {
            return output.to_string();
        }
        let mut end = FAILED_OUTPUT_CAP_BYTES;
        while end > 0 && !output.is_char_boundary(end) {
            end -= 1;
        }
        output[..end].to_string()
    }

    /// Checks the `file_paths` invariant: an entry for exactly the stages
    /// strictly before `next_stage` (or every stage, if complete), and no
    /// entry for `next_stage` or anything after it.
    pub fn validate_invariants(&self) -> Result<(), DiscourseError> {
        let boundary = self.next_stage.unwrap_or(Stage::Graph);
        let expected: Vec<Stage> = if self.next_stage.is_none() {
            crate::value_objects::STAGE_SEQUENCE.to_vec()
        } else {
            boundary.preceding().to_vec()
        };

        for stage in &expected {
            if !self.file_paths.contains_key(stage) {
                return Err(DiscourseError::internal_error(format!(
                    "item {} missing file_paths entry for completed stage {stage}",
                    self.id
                )));
            }
        }

        if let Some(next) = self.next_stage {
            if self.file_paths.contains_key(&next) {
                return Err(DiscourseError::internal_error(format!(
                    "item {} has a file_paths entry for its own next_stage {next}",
                    self.id
                )));
            }
            for stage in crate::value_objects::STAGE_SEQUENCE {
                if next.is_before(stage) && self.file_paths.contains_key(&stage) {
                    return Err(DiscourseError::internal_error(format!(
                        "item {} has a file_paths entry for unreached stage {stage}",
                        self.id
                    )));
                }
            }
        }

        Ok(())
    }
}
