// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HTTP Scrape Processor
//!
//! A real but minimal `scrape` stage: `reqwest` fetches `source_url`,
//! `scraper` strips markup down to plain text. No JS rendering, no
//! site-specific extraction heuristics — a production deployment would
//! swap this out behind the same `StageProcessor` contract.

use adaptive_pipeline_domain::artifacts::ScrapeArtifact;
use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{StageMetadata, StageProcessor, StageResult};
use adaptive_pipeline_domain::value_objects::Stage;
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::collections::HashMap;

pub struct ScrapeProcessor {
    client: reqwest::Client,
}

impl ScrapeProcessor {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    /// Strips tags and collapses runs of whitespace, the same notion of
    /// "text content" browsers expose via `Node.textContent`.
    fn extract_text(html: &str) -> String {
        let document = Html::parse_document(html);
        let body_selector = Selector::parse("body").expect("static selector is valid");
        let text: String = document
            .select(&body_selector)
            .next()
            .map(|body| body.text().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for ScrapeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageProcessor for ScrapeProcessor {
    fn stage(&self) -> Stage {
        Stage::Scrape
    }

    fn required_prior_stages(&self) -> &'static [Stage] {
        &[Stage::Discover]
    }

    async fn process(
        &self,
        state: &PipelineState,
        _prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError> {
        let response = self
            .client
            .get(&state.source_url)
            .send()
            .await
            .map_err(|e| DiscourseError::processor_error(format!("scrape GET failed: {e}")))?
            .error_for_status()
            .map_err(|e| DiscourseError::processor_error(format!("scrape GET returned an error status: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| DiscourseError::processor_error(format!("reading response body failed: {e}")))?;

        let full_text = Self::extract_text(&html);
        let word_count = ScrapeArtifact::word_count_of(&full_text);

        let artifact = ScrapeArtifact {
            full_text,
            word_count,
            title: state.title.clone(),
            content_date: state.content_date,
            content_type: state.content_type,
            source_url: state.source_url.clone(),
        };

        let payload = json!(artifact);
        Ok(StageResult::new(payload))
    }
}

#[async_trait]
impl StageProcessor for StaticTextScrapeProcessor {
    fn stage(&self) -> Stage {
        Stage::Scrape
    }

    fn required_prior_stages(&self) -> &'static [Stage] {
        &[Stage::Discover]
    }

    async fn process(
        &self,
        state: &PipelineState,
        _prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError> {
        let full_text = self.text.clone();
        let word_count = ScrapeArtifact::word_count_of(&full_text);
        let artifact = ScrapeArtifact {
            full_text,
            word_count,
            title: state.title.clone(),
            content_date: state.content_date,
            content_type: state.content_type,
            source_url: state.source_url.clone(),
        };
        Ok(StageResult::with_metadata(json!(artifact), StageMetadata::default()))
    }
}

/// A fixed-text `ScrapeProcessor` for tests and offline fixtures: skips the
/// network entirely and returns `text` verbatim. Useful the way
/// `SourcesFileDiscoverProcessor` stands in for a real crawler.
pub struct StaticTextScrapeProcessor {
    text: String,
}

impl StaticTextScrapeProcessor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_pipeline_domain::value_objects::ContentType;
    use adaptive_pipeline_domain::value_objects::ItemId;

    fn sample_state(source_url: &str) -> PipelineState {
        PipelineState::new_discovered(
            ItemId::new(),
            "jane-doe",
            source_url,
            ContentType::Speech,
            Some("A Speech".into()),
            None,
        )
    }

    #[test]
    fn extract_text_strips_tags_and_collapses_whitespace() {
        let html = "<html><body><p>Hello   <b>world</b></p>\n\n<p>!</p></body></html>";
        let text = ScrapeProcessor::extract_text(html);
        assert_eq!(text, "Hello world !");
    }

    #[tokio::test]
    async fn static_text_processor_returns_the_fixed_text_verbatim() {
        let processor = StaticTextScrapeProcessor::new("hello there friend");
        let state = sample_state("https://example.com/a");
        let result = processor.process(&state, &HashMap::new()).await.unwrap();

        let artifact: ScrapeArtifact = serde_json::from_value(result.artifact).unwrap();
        assert_eq!(artifact.full_text, "hello there friend");
        assert_eq!(artifact.word_count, 3);
        assert_eq!(artifact.source_url, "https://example.com/a");
    }
}
