// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # JSON-File Graph Store
//!
//! A `GraphStore` implementation for local development and tests: every
//! node/edge kind lives in its own `HashMap` keyed by natural key, guarded
//! by a `tokio::sync::RwLock`, and the whole document is rewritten to disk
//! (write-temp-then-rename, as `JsonlStateJournal` does) after every
//! mutating call. No Cypher, no network — exercises the exact upsert
//! semantics `Neo4jGraphStore` must also provide, which is what makes it
//! useful for integration tests that don't want a live Neo4j instance.

use adaptive_pipeline_domain::graph::{Communication, Edge, Entity, Mention, Speaker, Subject};
use adaptive_pipeline_domain::repositories::{GraphStore, UpsertOutcome};
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GraphDocument {
    speakers: HashMap<String, Speaker>,
    communications: HashMap<String, Communication>,
    entities: HashMap<String, Entity>,
    mentions: HashMap<String, Mention>,
    subjects: HashMap<String, Subject>,
    edges: Vec<Edge>,
}

pub struct JsonFileGraphStore {
    path: PathBuf,
    document: RwLock<GraphDocument>,
}

impl JsonFileGraphStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DiscourseError> {
        let path = path.into();
        let document = if path.exists() {
            let bytes = tokio::fs::read(&path).await?;
            serde_json::from_slice(&bytes)?
        } else {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            GraphDocument::default()
        };
        Ok(Self { path, document: RwLock::new(document) })
    }

    async fn persist(&self, document: &GraphDocument) -> Result<(), DiscourseError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for JsonFileGraphStore {
    async fn upsert_speaker(&self, speaker: &Speaker) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let outcome = upsert(&mut document.speakers, speaker.key(), speaker.clone());
        self.persist(&document).await?;
        Ok(outcome)
    }

    async fn upsert_communication(
        &self,
        communication: &Communication,
    ) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let outcome =
            upsert(&mut document.communications, communication.key().to_string(), communication.clone());
        self.persist(&document).await?;
        Ok(outcome)
    }

    async fn upsert_entity(&self, entity: &Entity) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let key = entity.key().to_string();
        let outcome = if let Some(existing) = document.entities.get(&key) {
            // First-write-wins on conflicting entity_type (§4.5 step 3a):
            // keep the type already on record, but still report Merged.
            let _ = existing;
            UpsertOutcome::Merged
        } else {
            document.entities.insert(key, entity.clone());
            UpsertOutcome::Created
        };
        self.persist(&document).await?;
        Ok(outcome)
    }

    async fn get_entity(&self, canonical_name_key: &str) -> Result<Option<Entity>, DiscourseError> {
        let document = self.document.read().await;
        Ok(document.entities.get(canonical_name_key).cloned())
    }

    async fn upsert_mention(&self, mention: &Mention) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let outcome = upsert(&mut document.mentions, mention.key(), mention.clone());
        self.persist(&document).await?;
        Ok(outcome)
    }

    async fn upsert_subject(&self, subject: &Subject) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let outcome = upsert(&mut document.subjects, subject.key(), subject.clone());
        self.persist(&document).await?;
        Ok(outcome)
    }

    async fn upsert_edge(&self, edge: &Edge) -> Result<UpsertOutcome, DiscourseError> {
        let mut document = self.document.write().await;
        let outcome = if document.edges.contains(edge) {
            UpsertOutcome::Merged
        } else {
            document.edges.push(edge.clone());
            UpsertOutcome::Created
        };
        self.persist(&document).await?;
        Ok(outcome)
    }
}

fn upsert<V: Clone>(map: &mut HashMap<String, V>, key: String, value: V) -> UpsertOutcome {
    if map.contains_key(&key) {
        map.insert(key, value);
        UpsertOutcome::Merged
    } else {
        map.insert(key, value);
        UpsertOutcome::Created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_pipeline_domain::value_objects::EntityType;

    fn entity(name: &str) -> Entity {
        Entity { canonical_name: name.to_string(), entity_type: EntityType::Organization }
    }

    #[tokio::test]
    async fn first_upsert_of_an_entity_reports_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        let outcome = store.upsert_entity(&entity("federal reserve")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);
    }

    #[tokio::test]
    async fn repeat_upsert_of_the_same_entity_reports_merged() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        store.upsert_entity(&entity("federal reserve")).await.unwrap();
        let outcome = store.upsert_entity(&entity("federal reserve")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Merged);
    }

    #[tokio::test]
    async fn entity_type_conflict_keeps_the_first_seen_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        store.upsert_entity(&entity("federal reserve")).await.unwrap();

        let conflicting = Entity { canonical_name: "federal reserve".into(), entity_type: EntityType::Location };
        store.upsert_entity(&conflicting).await.unwrap();

        let document: GraphDocument =
            serde_json::from_slice(&tokio::fs::read(dir.path().join("graph.json")).await.unwrap()).unwrap();
        assert_eq!(document.entities["federal reserve"].entity_type, EntityType::Organization);
    }

    #[tokio::test]
    async fn get_entity_reflects_the_first_seen_type_after_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        store.upsert_entity(&entity("federal reserve")).await.unwrap();
        let conflicting = Entity { canonical_name: "federal reserve".into(), entity_type: EntityType::Location };
        store.upsert_entity(&conflicting).await.unwrap();

        let fetched = store.get_entity("federal reserve").await.unwrap().unwrap();
        assert_eq!(fetched.entity_type, EntityType::Organization);
    }

    #[tokio::test]
    async fn get_entity_returns_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        assert!(store.get_entity("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeat_edge_upsert_is_a_no_op_merge() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGraphStore::open(dir.path().join("graph.json")).await.unwrap();
        let edge = Edge::Delivered { speaker_key: "jane doe".into(), communication_key: "abc".into() };

        assert_eq!(store.upsert_edge(&edge).await.unwrap(), UpsertOutcome::Created);
        assert_eq!(store.upsert_edge(&edge).await.unwrap(), UpsertOutcome::Merged);
    }

    #[tokio::test]
    async fn reopening_the_store_preserves_previously_upserted_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        {
            let store = JsonFileGraphStore::open(&path).await.unwrap();
            store.upsert_entity(&entity("federal reserve")).await.unwrap();
        }

        let reopened = JsonFileGraphStore::open(&path).await.unwrap();
        let outcome = reopened.upsert_entity(&entity("federal reserve")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Merged);
    }
}
