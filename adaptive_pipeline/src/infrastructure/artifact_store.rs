// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File-Backed Artifact Store
//!
//! `FileArtifactStore` writes each stage's artifact as one JSON file under
//! `{data_root}/{environment}/{speaker}/{stage}/{content_type}/{id}.json`,
//! where `root` is already scoped to `{data_root}/{environment}` by the
//! caller. Writes go to a `.tmp` sibling first, then `rename` over the
//! final path, so a reader never observes a partially-written artifact.

use adaptive_pipeline_domain::repositories::ArtifactStore;
use adaptive_pipeline_domain::value_objects::{ContentType, ItemId, Stage};
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, speaker: &str, stage: Stage, content_type: ContentType, id: ItemId) -> PathBuf {
        self.root
            .join(sanitize(speaker))
            .join(stage.as_str())
            .join(content_type.as_str())
            .join(format!("{id}.json"))
    }
}

/// Replaces path separators in a speaker name so it can't escape the
/// artifact root; speaker strings already passed `SecureArgParser` at the
/// CLI boundary, but an artifact store is reused by library callers too.
fn sanitize(raw: &str) -> String {
    raw.replace(['/', '\\'], "_")
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn save(
        &self,
        id: ItemId,
        speaker: &str,
        stage: Stage,
        content_type: ContentType,
        payload: serde_json::Value,
    ) -> Result<String, DiscourseError> {
        let path = self.path_for(speaker, stage, content_type, id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&payload)?;
        tokio::fs::write(&tmp_path, &body).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> Result<serde_json::Value, DiscourseError> {
        let bytes = tokio::fs::read(Path::new(path)).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn save_then_load_round_trips_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path());
        let id = ItemId::new();

        let payload = json!({ "full_text": "hello", "word_count": 1 });
        let path = store
            .save(id, "jane-doe", Stage::Scrape, ContentType::Speech, payload.clone())
            .await
            .unwrap();

        let loaded = store.load(&path).await.unwrap();
        assert_eq!(loaded, payload);
    }

    #[tokio::test]
    async fn save_uses_the_content_type_path_segment() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path());
        let id = ItemId::new();

        let path = store
            .save(id, "jane-doe", Stage::Discover, ContentType::Interview, json!({"source_url": "https://x"}))
            .await
            .unwrap();

        assert!(path.contains(ContentType::Interview.as_str()));
    }

    #[tokio::test]
    async fn speaker_path_segment_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path());
        let id = ItemId::new();

        let path = store
            .save(id, "jane/../doe", Stage::Discover, ContentType::Speech, json!({}))
            .await
            .unwrap();

        assert!(!path.contains(".."));
    }

    #[tokio::test]
    async fn load_missing_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path());
        let err = store.load(&dir.path().join("nope.json").to_string_lossy()).await;
        assert!(err.is_err());
    }
}
