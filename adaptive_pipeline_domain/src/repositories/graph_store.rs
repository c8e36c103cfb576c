// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Graph Store Interface
//!
//! The upsert surface the Graph Builder drives (§4.5 step 4). One call per
//! node/edge kind, all MERGE-on-natural-key semantics: non-key attributes
//! overwrite, the node (or edge) is created if absent. Implementations
//! report whether each call created a new node/edge or merged into an
//! existing one, which the Graph Builder tallies into its `GraphArtifact`.

use crate::graph::{Communication, Edge, Entity, Mention, Speaker, Subject};
use crate::DiscourseError;
use async_trait::async_trait;

/// Whether an upsert created a new node/edge or merged attributes into an
/// existing one sharing the same natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Merged,
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn upsert_speaker(&self, speaker: &Speaker) -> Result<UpsertOutcome, DiscourseError>;
    async fn upsert_communication(
        &self,
        communication: &Communication,
    ) -> Result<UpsertOutcome, DiscourseError>;
    /// Upserts an Entity. If `entity_type` disagrees with an existing node
    /// of the same key, the store must keep the first-seen type (§4.5 step
    /// 3a) and report `Merged` regardless — the caller logs the conflict.
    async fn upsert_entity(&self, entity: &Entity) -> Result<UpsertOutcome, DiscourseError>;
    /// Looks up an Entity by its natural key without mutating anything.
    /// The Graph Builder calls this before `upsert_entity` to compare the
    /// incoming `entity_type` against what's on record and log a conflict
    /// itself — the store's own first-write-wins behavior never surfaces
    /// whether a conflict actually happened.
    async fn get_entity(&self, canonical_name_key: &str) -> Result<Option<Entity>, DiscourseError>;
    async fn upsert_mention(&self, mention: &Mention) -> Result<UpsertOutcome, DiscourseError>;
    async fn upsert_subject(&self, subject: &Subject) -> Result<UpsertOutcome, DiscourseError>;

    /// Upserts a directed edge. Edges have no independent natural key
    /// beyond their endpoint pair and relationship type; a repeated upsert
    /// of the same edge is a no-op `Merged`.
    async fn upsert_edge(&self, edge: &Edge) -> Result<UpsertOutcome, DiscourseError>;
}
