// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Fixture-Backed Categorize Processor
//!
//! Stands in for the production `categorize` stage's LLM call (entity,
//! topic, and sentiment extraction from the transcript): reads a
//! `categorizations.json` fixture keyed by `source_url` and returns the
//! `CategorizeArtifact` on file, or zero entities if the item has no entry
//! (a valid outcome — §8 treats an empty entity list as well-formed). A
//! production deployment replaces this with a processor that prompts a
//! model via `LLM_API_KEY` and parses its structured output into the same
//! `CategorizeArtifact` shape, still subject to the same `validate()` call.

use adaptive_pipeline_domain::artifacts::CategorizeArtifact;
use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{StageProcessor, StageResult};
use adaptive_pipeline_domain::value_objects::Stage;
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct CategorizeProcessor {
    path: PathBuf,
}

impl CategorizeProcessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_fixtures(&self) -> Result<HashMap<String, CategorizeArtifact>, DiscourseError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let fixtures = serde_json::from_slice(&bytes)?;
        Ok(fixtures)
    }
}

#[async_trait]
impl StageProcessor for CategorizeProcessor {
    fn stage(&self) -> Stage {
        Stage::Categorize
    }

    fn required_prior_stages(&self) -> &'static [Stage] {
        &[Stage::Scrape, Stage::Summarize]
    }

    async fn process(
        &self,
        state: &PipelineState,
        _prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError> {
        let fixtures = self.load_fixtures().await?;
        let artifact = fixtures
            .get(&state.source_url)
            .cloned()
            .unwrap_or(CategorizeArtifact { entities: Vec::new() });

        artifact.validate()?;

        Ok(StageResult::new(json!(artifact)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_pipeline_domain::value_objects::{ContentType, ItemId};

    fn sample_state(source_url: &str) -> PipelineState {
        PipelineState::new_discovered(
            ItemId::new(),
            "jane-doe",
            source_url,
            ContentType::Speech,
            None,
            None,
        )
    }

    async fn write_fixtures(dir: &std::path::Path, json: &str) -> PathBuf {
        let path = dir.join("categorizations.json");
        tokio::fs::write(&path, json).await.unwrap();
        path
    }

    #[tokio::test]
    async fn unknown_source_url_yields_zero_entities() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixtures(dir.path(), r#"{}"#).await;
        let processor = CategorizeProcessor::new(path);

        let result = processor.process(&sample_state("https://x"), &HashMap::new()).await.unwrap();
        let artifact: CategorizeArtifact = serde_json::from_value(result.artifact).unwrap();
        assert!(artifact.entities.is_empty());
    }

    #[tokio::test]
    async fn known_source_url_returns_its_fixture_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = r#"{
            "https://example.com/a": {
                "entities": [{
                    "entity_name": "Federal Reserve",
                    "entity_type": "organization",
                    "mentions": [{
                        "topic": "economics",
                        "context": "discussing the direction of monetary policy",
                        "subjects": [{
                            "subject_name": "interest rates",
                            "sentiment": "negative",
                            "quotes": ["rates are too high"]
                        }]
                    }]
                }]
            }
        }"#;
        let path = write_fixtures(dir.path(), fixture).await;
        let processor = CategorizeProcessor::new(path);

        let result = processor
            .process(&sample_state("https://example.com/a"), &HashMap::new())
            .await
            .unwrap();
        let artifact: CategorizeArtifact = serde_json::from_value(result.artifact).unwrap();
        assert_eq!(artifact.entities.len(), 1);
        assert_eq!(artifact.entities[0].entity_name, "Federal Reserve");
    }

    #[tokio::test]
    async fn invalid_fixture_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = r#"{
            "https://example.com/bad": {
                "entities": [{
                    "entity_name": "Federal Reserve",
                    "entity_type": "organization",
                    "mentions": [{
                        "topic": "economics",
                        "context": "too short",
                        "subjects": []
                    }]
                }]
            }
        }"#;
        let path = write_fixtures(dir.path(), fixture).await;
        let processor = CategorizeProcessor::new(path);

        let result = processor.process(&sample_state("https://example.com/bad"), &HashMap::new()).await;
        assert!(result.is_err());
    }
}
