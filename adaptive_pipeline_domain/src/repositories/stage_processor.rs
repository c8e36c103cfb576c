// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Processor Interface
//!
//! The contract every stage implementation satisfies (§4.4, §6). A
//! processor is a pure function of `(state, prior_artifacts)`: it never
//! touches the Journal or Artifact Store, which keeps it unit-testable and
//! keeps the Runtime the sole agent of state transitions.
//!
//! Discover is special-cased as `DiscoverProcessor`: it takes a parameter
//! object instead of an item's state, since it's the stage that creates
//! items rather than advancing them.

use crate::entities::PipelineState;
use crate::value_objects::{ContentType, Stage};
use crate::DiscourseError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// Merged into a `PipelineState` on `update_on_success`; corresponds to the
/// `metadata` field of `StageResult` (§6). Empty/`None` values never
/// overwrite non-empty existing ones — `StateJournal::update_on_success`
/// enforces that rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageMetadata {
    pub title: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub content_type: Option<ContentType>,
}

/// What a processor returns on success: the artifact to persist and the
/// metadata to merge back into the item's `PipelineState`.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub artifact: Value,
    pub metadata: StageMetadata,
}

impl StageResult {
    pub fn new(artifact: Value) -> Self {
        Self { artifact, metadata: StageMetadata::default() }
    }

    pub fn with_metadata(artifact: Value, metadata: StageMetadata) -> Self {
        Self { artifact, metadata }
    }
}

/// A stage processor for any of Scrape, Summarize, Categorize, Graph.
/// Discover is not a `StageProcessor`; see `DiscoverProcessor` below.
#[async_trait]
pub trait StageProcessor: Send + Sync {
    /// The stage this processor fulfills.
    fn stage(&self) -> Stage;

    /// Prior stages whose artifacts the Runtime must load and pass in
    /// `prior_artifacts` before invoking `process`.
    fn required_prior_stages(&self) -> &'static [Stage];

    /// Runs the stage for one item. `prior_artifacts` contains exactly the
    /// stages named by `required_prior_stages`, keyed by `Stage::as_str`.
    async fn process(
        &self,
        state: &PipelineState,
        prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError>;
}

/// Parameters the `discover` stage is invoked with (§4.3): a speaker and a
/// date range to search, rather than an existing item's state.
#[derive(Debug, Clone)]
pub struct DiscoverParams {
    pub speaker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One item `discover` found, before it has been inserted into the
/// Journal. The Runtime assigns nothing here — `id` is generated by the
/// processor itself since it's the only stage that creates identity.
#[derive(Debug, Clone)]
pub struct DiscoveredItem {
    pub source_url: String,
    pub content_type: ContentType,
    pub title: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub artifact: Value,
}

/// The discover stage's processor contract: given a speaker and date
/// range, returns zero or more newly discovered items. The Runtime inserts
/// each via `Journal::create`, silently skipping duplicates by
/// `source_url` (§7's `DUPLICATE_SOURCE_URL`).
#[async_trait]
pub trait DiscoverProcessor: Send + Sync {
    async fn discover(
        &self,
        params: &DiscoverParams,
    ) -> Result<Vec<DiscoveredItem>, DiscourseError>;
}
