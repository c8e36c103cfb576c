// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Neo4j Graph Store
//!
//! Production `GraphStore`: every upsert is a single `MERGE` query against
//! a live Neo4j instance over `neo4rs`'s Bolt driver. `MERGE ... ON CREATE
//! SET ... ON MATCH SET ...` gives us `UpsertOutcome` for free by comparing
//! the node's `created_at` marker to the query's own write time — `neo4rs`
//! doesn't expose stats on which clause fired, so each query stamps a
//! `_upserted_at` property and we read back whether `_created_at` was just
//! set in the same pass.

use adaptive_pipeline_domain::graph::{Communication, Edge, Entity, Mention, Speaker, Subject};
use adaptive_pipeline_domain::repositories::{GraphStore, UpsertOutcome};
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use neo4rs::{query, Graph};

pub struct Neo4jGraphStore {
    graph: Graph,
}

impl Neo4jGraphStore {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, DiscourseError> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| DiscourseError::internal_error(format!("neo4j connection failed: {e}")))?;
        Ok(Self { graph })
    }

    /// Runs `cypher`, which must `RETURN created` as a boolean marking
    /// whether the `MERGE` took its `ON CREATE` branch, and maps it to an
    /// `UpsertOutcome`.
    async fn run_merge(&self, cypher: neo4rs::Query) -> Result<UpsertOutcome, DiscourseError> {
        let mut result = self
            .graph
            .execute(cypher)
            .await
            .map_err(|e| DiscourseError::internal_error(format!("neo4j query failed: {e}")))?;

        let row = result
            .next()
            .await
            .map_err(|e| DiscourseError::internal_error(format!("neo4j row fetch failed: {e}")))?
            .ok_or_else(|| DiscourseError::internal_error("merge query returned no rows"))?;

        let created: bool = row
            .get("created")
            .map_err(|e| DiscourseError::internal_error(format!("missing `created` column: {e}")))?;

        Ok(if created { UpsertOutcome::Created } else { UpsertOutcome::Merged })
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn upsert_speaker(&self, speaker: &Speaker) -> Result<UpsertOutcome, DiscourseError> {
        let cypher = query(
            "MERGE (s:Speaker {key: $key}) \
             ON CREATE SET s.created = true, s.name = $name, s.display_name = $display_name, \
                s.role = $role, s.organization = $organization, s.industry = $industry, \
                s.region = $region, s.bio = $bio, s.influence_score = $influence_score \
             ON MATCH SET s.created = false, s.name = $name, s.display_name = $display_name, \
                s.role = $role, s.organization = $organization, s.industry = $industry, \
                s.region = $region, s.bio = $bio, s.influence_score = $influence_score \
             RETURN s.created AS created",
        )
        .param("key", speaker.key())
        .param("name", speaker.name.clone())
        .param("display_name", speaker.display_name.clone())
        .param("role", speaker.role.clone())
        .param("organization", speaker.organization.clone())
        .param("industry", speaker.industry.clone())
        .param("region", speaker.region.clone())
        .param("bio", speaker.bio.clone().unwrap_or_default())
        .param("influence_score", speaker.influence_score.unwrap_or(0.0));

        self.run_merge(cypher).await
    }

    async fn upsert_communication(
        &self,
        communication: &Communication,
    ) -> Result<UpsertOutcome, DiscourseError> {
        let cypher = query(
            "MERGE (c:Communication {key: $key}) \
             ON CREATE SET c.created = true, c.title = $title, c.content_type = $content_type, \
                c.source_url = $source_url, c.full_text = $full_text, c.word_count = $word_count, \
                c.was_summarized = $was_summarized, c.compression_ratio = $compression_ratio \
             ON MATCH SET c.created = false, c.title = $title, c.content_type = $content_type, \
                c.source_url = $source_url, c.full_text = $full_text, c.word_count = $word_count, \
                c.was_summarized = $was_summarized, c.compression_ratio = $compression_ratio \
             RETURN c.created AS created",
        )
        .param("key", communication.key())
        .param("title", communication.title.clone().unwrap_or_default())
        .param("content_type", communication.content_type.as_str())
        .param("source_url", communication.source_url.clone())
        .param("full_text", communication.full_text.clone())
        .param("word_count", communication.word_count as i64)
        .param("was_summarized", communication.was_summarized)
        .param("compression_ratio", communication.compression_ratio.unwrap_or(0.0));

        self.run_merge(cypher).await
    }

    async fn upsert_entity(&self, entity: &Entity) -> Result<UpsertOutcome, DiscourseError> {
        // First-write-wins on entity_type: only set it ON CREATE, never
        // overwrite on a later MATCH (§4.5 step 3a).
        let cypher = query(
            "MERGE (e:Entity {key: $key}) \
             ON CREATE SET e.created = true, e.canonical_name = $canonical_name, e.entity_type = $entity_type \
             ON MATCH SET e.created = false \
             RETURN e.created AS created",
        )
        .param("key", entity.key())
        .param("canonical_name", entity.canonical_name.clone())
        .param("entity_type", entity.entity_type.as_str());

        self.run_merge(cypher).await
    }

    async fn get_entity(&self, canonical_name_key: &str) -> Result<Option<Entity>, DiscourseError> {
        let cypher = query("MATCH (e:Entity {key: $key}) RETURN e.canonical_name AS canonical_name, e.entity_type AS entity_type")
            .param("key", canonical_name_key);

        let mut result = self
            .graph
            .execute(cypher)
            .await
            .map_err(|e| DiscourseError::internal_error(format!("neo4j query failed: {e}")))?;

        let row = result
            .next()
            .await
            .map_err(|e| DiscourseError::internal_error(format!("neo4j row fetch failed: {e}")))?;

        let Some(row) = row else { return Ok(None) };

        let canonical_name: String = row
            .get("canonical_name")
            .map_err(|e| DiscourseError::internal_error(format!("missing `canonical_name` column: {e}")))?;
        let entity_type_raw: String = row
            .get("entity_type")
            .map_err(|e| DiscourseError::internal_error(format!("missing `entity_type` column: {e}")))?;
        let entity_type = serde_json::from_value(serde_json::Value::String(entity_type_raw.clone()))
            .map_err(|e| DiscourseError::internal_error(format!("unrecognized entity_type {entity_type_raw:?}: {e}")))?;

        Ok(Some(Entity { canonical_name, entity_type }))
    }

    async fn upsert_mention(&self, mention: &Mention) -> Result<UpsertOutcome, DiscourseError> {
        let sentiment_json = serde_json::to_string(&mention.aggregated_sentiment)
            .map_err(|e| DiscourseError::internal_error(format!("sentiment serialization failed: {e}")))?;

        let cypher = query(
            "MERGE (m:Mention {key: $key}) \
             ON CREATE SET m.created = true, m.communication_id = $communication_id, \
                m.entity_canonical_name = $entity_canonical_name, m.topic = $topic, \
                m.context = $context, m.aggregated_sentiment = $aggregated_sentiment \
             ON MATCH SET m.created = false, m.communication_id = $communication_id, \
                m.entity_canonical_name = $entity_canonical_name, m.topic = $topic, \
                m.context = $context, m.aggregated_sentiment = $aggregated_sentiment \
             RETURN m.created AS created",
        )
        .param("key", mention.key())
        .param("communication_id", mention.communication_id.clone())
        .param("entity_canonical_name", mention.entity_canonical_name.clone())
        .param("topic", mention.topic.as_str())
        .param("context", mention.context.clone())
        .param("aggregated_sentiment", sentiment_json);

        self.run_merge(cypher).await
    }

    async fn upsert_subject(&self, subject: &Subject) -> Result<UpsertOutcome, DiscourseError> {
        let cypher = query(
            "MERGE (s:Subject {key: $key}) \
             ON CREATE SET s.created = true, s.mention_key = $mention_key, s.subject_name = $subject_name, \
                s.sentiment = $sentiment, s.quotes = $quotes \
             ON MATCH SET s.created = false, s.mention_key = $mention_key, s.subject_name = $subject_name, \
                s.sentiment = $sentiment, s.quotes = $quotes \
             RETURN s.created AS created",
        )
        .param("key", subject.key())
        .param("mention_key", subject.mention_key.clone())
        .param("subject_name", subject.subject_name.clone())
        .param("sentiment", subject.sentiment.as_str())
        .param("quotes", subject.quotes.clone());

        self.run_merge(cypher).await
    }

    async fn upsert_edge(&self, edge: &Edge) -> Result<UpsertOutcome, DiscourseError> {
        let (from_label, from_key, to_label, to_key) = match edge {
            Edge::Delivered { speaker_key, communication_key } => {
                ("Speaker", speaker_key.clone(), "Communication", communication_key.clone())
            }
            Edge::HasMention { communication_key, mention_key } => {
                ("Communication", communication_key.clone(), "Mention", mention_key.clone())
            }
            Edge::RefersTo { mention_key, entity_key } => {
                ("Mention", mention_key.clone(), "Entity", entity_key.clone())
            }
            Edge::HasSubject { mention_key, subject_key } => {
                ("Mention", mention_key.clone(), "Subject", subject_key.clone())
            }
        };

        let cypher_text = format!(
            "MATCH (from:{from_label} {{key: $from_key}}), (to:{to_label} {{key: $to_key}}) \
             MERGE (from)-[r:{rel}]->(to) \
             ON CREATE SET r.created = true \
             ON MATCH SET r.created = false \
             RETURN r.created AS created",
            rel = edge.relationship_type(),
        );

        let cypher = query(&cypher_text).param("from_key", from_key).param("to_key", to_key);

        self.run_merge(cypher).await
    }
}
