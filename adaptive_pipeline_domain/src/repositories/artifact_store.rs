// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Artifact Store Interface
//!
//! Pure file I/O keyed by `(environment, speaker, stage, content_type,
//! item_id)` (§4.2). No business logic lives here — validation of a
//! deserialized payload is the caller's job.
//!
//! The trait is expressed over `serde_json::Value` rather than a generic
//! `T: Serialize`/`DeserializeOwned` so that `dyn ArtifactStore` stays
//! object-safe — the Runtime holds a single `Arc<dyn ArtifactStore>` shared
//! across every stage, each of which persists a different artifact shape.
//! Callers convert to/from their concrete artifact type with
//! `serde_json::to_value`/`serde_json::from_value`.

use crate::value_objects::{ContentType, ItemId, Stage};
use crate::DiscourseError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Serializes `payload` as UTF-8 JSON at the path the path policy
    /// derives from the key, creating parent directories on demand, and
    /// returns that path. Overwriting an existing artifact is permitted
    /// (re-runs are idempotent).
    async fn save(
        &self,
        id: ItemId,
        speaker: &str,
        stage: Stage,
        content_type: ContentType,
        payload: Value,
    ) -> Result<String, DiscourseError>;

    /// Deserializes the artifact at `path`. Fails with `ArtifactMissing`
    /// if absent, `ArtifactCorrupt` if the JSON fails to parse.
    async fn load(&self, path: &str) -> Result<Value, DiscourseError>;
}
