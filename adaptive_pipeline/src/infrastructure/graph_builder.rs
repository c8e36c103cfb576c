// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Graph Builder
//!
//! The `graph` stage's processor (§4.5): the one stage implemented to full
//! fidelity rather than as a fixture stand-in, since it's the subsystem
//! this crate exists to get right. Reads `scrape`, `summarize`, and
//! `categorize` artifacts for one item plus an out-of-band
//! `speakers.json`, assembles the node-and-edge set, and upserts it into a
//! `GraphStore`.

use adaptive_pipeline_domain::artifacts::{CategorizeArtifact, GraphArtifact, ScrapeArtifact, SummarizeArtifact};
use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::graph::key::{normalize_key, subject_key as make_subject_key};
use adaptive_pipeline_domain::graph::node::{AggregatedSentiment, SentimentStat};
use adaptive_pipeline_domain::graph::{Communication, Edge, Entity, Mention, Speaker, Subject};
use adaptive_pipeline_domain::repositories::graph_store::UpsertOutcome;
use adaptive_pipeline_domain::repositories::{GraphStore, StageProcessor, StageResult};
use adaptive_pipeline_domain::services::sentiment;
use adaptive_pipeline_domain::value_objects::Stage;
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const QUOTES_MAX: usize = 6;

#[derive(Debug, Clone, Deserialize)]
struct SpeakerRecord {
    display_name: String,
    role: String,
    organization: String,
    industry: String,
    region: String,
    #[serde(default)]
    date_of_birth: Option<chrono::NaiveDate>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    influence_score: Option<f64>,
}

pub struct GraphBuilder {
    store: Arc<dyn GraphStore>,
    speakers_path: PathBuf,
}

impl GraphBuilder {
    pub fn new(store: Arc<dyn GraphStore>, speakers_path: impl Into<PathBuf>) -> Self {
        Self { store, speakers_path: speakers_path.into() }
    }

    async fn load_speaker(&self, speaker: &str) -> Result<Speaker, DiscourseError> {
        let bytes = tokio::fs::read(&self.speakers_path).await?;
        let registry: HashMap<String, SpeakerRecord> = serde_json::from_slice(&bytes)?;
        let record = registry
            .get(speaker)
            .ok_or_else(|| DiscourseError::SpeakerUnknown(speaker.to_string()))?;

        Ok(Speaker {
            name: speaker.to_string(),
            display_name: record.display_name.clone(),
            role: record.role.clone(),
            organization: record.organization.clone(),
            industry: record.industry.clone(),
            region: record.region.clone(),
            date_of_birth: record.date_of_birth,
            bio: record.bio.clone(),
            influence_score: record.influence_score,
        })
    }

    /// Upserts an Entity, keeping the first-seen `entity_type` and logging
    /// a conflict rather than failing (§4.5 step 3a).
    async fn upsert_entity_first_write_wins(
        &self,
        entity: &Entity,
        warnings: &mut Vec<String>,
    ) -> Result<UpsertOutcome, DiscourseError> {
        if let Some(existing) = self.store.get_entity(entity.key()).await? {
            if existing.entity_type != entity.entity_type {
                let message = format!(
                    "entity {:?} already has type {:?}; keeping it over incoming {:?}",
                    entity.canonical_name, existing.entity_type, entity.entity_type
                );
                warn!("{message}");
                warnings.push(message);
            }
        }
        self.store.upsert_entity(entity).await
    }

    fn tally(outcome: UpsertOutcome, nodes_created: &mut u32, nodes_merged: &mut u32) {
        match outcome {
            UpsertOutcome::Created => *nodes_created += 1,
            UpsertOutcome::Merged => *nodes_merged += 1,
        }
    }
}

#[async_trait]
impl StageProcessor for GraphBuilder {
    fn stage(&self) -> Stage {
        Stage::Graph
    }

    fn required_prior_stages(&self) -> &'static [Stage] {
        &[Stage::Scrape, Stage::Summarize, Stage::Categorize]
    }

    async fn process(
        &self,
        state: &PipelineState,
        prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError> {
        let scrape: ScrapeArtifact = serde_json::from_value(
            prior_artifacts
                .get(Stage::Scrape.as_str())
                .ok_or_else(|| DiscourseError::internal_error("graph requires the scrape artifact"))?
                .clone(),
        )?;
        let summarize: SummarizeArtifact = serde_json::from_value(
            prior_artifacts
                .get(Stage::Summarize.as_str())
                .ok_or_else(|| DiscourseError::internal_error("graph requires the summarize artifact"))?
                .clone(),
        )?;
        let categorize: CategorizeArtifact = serde_json::from_value(
            prior_artifacts
                .get(Stage::Categorize.as_str())
                .ok_or_else(|| DiscourseError::internal_error("graph requires the categorize artifact"))?
                .clone(),
        )?;
        categorize.validate()?;

        let mut nodes_created = 0u32;
        let mut nodes_merged = 0u32;
        let mut edges_created = 0u32;
        let mut mention_count = 0u32;
        let mut subject_count = 0u32;
        let mut warnings = Vec::new();

        // Step 1: resolve Speaker.
        let speaker = self.load_speaker(&state.speaker).await?;

        // Step 2: build Communication.
        let communication = Communication {
            id: state.id.to_string(),
            title: state.title.clone(),
            content_type: state.content_type,
            content_date: state.content_date,
            source_url: state.source_url.clone(),
            full_text: scrape.full_text.clone(),
            word_count: scrape.word_count,
            was_summarized: summarize.was_summarized,
            compression_ratio: summarize.compression_ratio,
        };

        // Step 3: entities, mentions, subjects.
        let mut seen_mention_keys: HashSet<String> = HashSet::new();
        let mut mentions: Vec<Mention> = Vec::new();
        let mut subjects: Vec<Subject> = Vec::new();
        let mut entities: Vec<Entity> = Vec::new();

        for entity_mention in &categorize.entities {
            let canonical_name = normalize_key(&entity_mention.entity_name);
            let entity = Entity { canonical_name: canonical_name.clone(), entity_type: entity_mention.entity_type };
            entities.push(entity.clone());

            for topic_mention in &entity_mention.mentions {
                let mention_key = adaptive_pipeline_domain::graph::key::mention_key(
                    &communication.id,
                    &canonical_name,
                    topic_mention.topic.as_str(),
                );
                if !seen_mention_keys.insert(mention_key.clone()) {
                    return Err(DiscourseError::MentionDuplicate(mention_key));
                }

                let sentiments: Vec<_> = topic_mention.subjects.iter().map(|s| s.sentiment).collect();
                let aggregated_sentiment: AggregatedSentiment = sentiment::aggregate(&sentiments);

                mentions.push(Mention {
                    communication_id: communication.id.clone(),
                    entity_canonical_name: canonical_name.clone(),
                    topic: topic_mention.topic,
                    context: topic_mention.context.trim().to_string(),
                    aggregated_sentiment,
                });
                mention_count += 1;

                for subject in &topic_mention.subjects {
                    let mut quotes: Vec<String> = subject.quotes.iter().map(|q| q.trim().to_string()).collect();
                    quotes.truncate(QUOTES_MAX);

                    subjects.push(Subject {
                        mention_key: mention_key.clone(),
                        subject_name: subject.subject_name.trim().to_string(),
                        sentiment: subject.sentiment,
                        quotes,
                    });
                    subject_count += 1;
                }
            }
        }

        // Step 4: upsert in order — Speaker, Communication, Entity, Mention, Subject, then edges.
        let outcome = self.store.upsert_speaker(&speaker).await?;
        Self::tally(outcome, &mut nodes_created, &mut nodes_merged);

        let outcome = self.store.upsert_communication(&communication).await?;
        Self::tally(outcome, &mut nodes_created, &mut nodes_merged);

        for entity in &entities {
            let outcome = self.upsert_entity_first_write_wins(entity, &mut warnings).await?;
            Self::tally(outcome, &mut nodes_created, &mut nodes_merged);
        }

        for mention in &mentions {
            let outcome = self.store.upsert_mention(mention).await?;
            Self::tally(outcome, &mut nodes_created, &mut nodes_merged);
        }

        for subject in &subjects {
            let outcome = self.store.upsert_subject(subject).await?;
            Self::tally(outcome, &mut nodes_created, &mut nodes_merged);
        }

        let outcome = self
            .store
            .upsert_edge(&Edge::Delivered {
                speaker_key: speaker.key(),
                communication_key: communication.key().to_string(),
            })
            .await?;
        if outcome == UpsertOutcome::Created {
            edges_created += 1;
        }

        for mention in &mentions {
            let outcome = self
                .store
                .upsert_edge(&Edge::HasMention {
                    communication_key: communication.key().to_string(),
                    mention_key: mention.key(),
                })
                .await?;
            if outcome == UpsertOutcome::Created {
                edges_created += 1;
            }

            let outcome = self
                .store
                .upsert_edge(&Edge::RefersTo {
                    mention_key: mention.key(),
                    entity_key: mention.entity_canonical_name.clone(),
                })
                .await?;
            if outcome == UpsertOutcome::Created {
                edges_created += 1;
            }
        }

        for subject in &subjects {
            let outcome = self
                .store
                .upsert_edge(&Edge::HasSubject {
                    mention_key: subject.mention_key.clone(),
                    subject_key: make_subject_key(&subject.mention_key, &subject.subject_name),
                })
                .await?;
            if outcome == UpsertOutcome::Created {
                edges_created += 1;
            }
        }

        let artifact = GraphArtifact {
            nodes_created,
            nodes_merged,
            edges_created,
            mention_count,
            subject_count,
            warnings,
        };

        Ok(StageResult::new(json!(artifact)))
    }
}
