// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Extractive Summarize Processor
//!
//! A real but minimal `summarize` stage: below `target_word_count` the
//! transcript is left untouched (`was_summarized = false`), otherwise the
//! processor takes the transcript's leading sentences up to the target as
//! a naive extractive summary. No LLM call — a production deployment
//! swaps this out behind the same `StageProcessor` contract, prompting a
//! model with the `LLM_API_KEY` credential (§6).

use adaptive_pipeline_domain::artifacts::{ScrapeArtifact, SummarizeArtifact};
use adaptive_pipeline_domain::entities::PipelineState;
use adaptive_pipeline_domain::repositories::{StageProcessor, StageResult};
use adaptive_pipeline_domain::value_objects::Stage;
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

pub struct SummarizeProcessor {
    target_word_count: u64,
}

impl SummarizeProcessor {
    pub const DEFAULT_TARGET_WORD_COUNT: u64 = 150;

    pub fn new() -> Self {
        Self::with_target_word_count(Self::DEFAULT_TARGET_WORD_COUNT)
    }

    pub fn with_target_word_count(target_word_count: u64) -> Self {
        Self { target_word_count }
    }

    /// Takes leading sentences (split on `. `) until adding the next one
    /// would exceed `target_word_count`, always keeping at least one.
    fn extractive_summary(full_text: &str, target_word_count: u64) -> String {
        let sentences: Vec<&str> = full_text.split_inclusive(['.', '?', '!']).collect();
        let mut summary = String::new();
        let mut words = 0u64;

        for sentence in &sentences {
            let sentence_words = sentence.split_whitespace().count() as u64;
            if words > 0 && words + sentence_words > target_word_count {
                break;
            }
            summary.push_str(sentence);
            words += sentence_words;
        }

        if summary.trim().is_empty() {
            full_text
                .split_whitespace()
                .take(target_word_count.max(1) as usize)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            summary.trim().to_string()
        }
    }
}

impl Default for SummarizeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageProcessor for SummarizeProcessor {
    fn stage(&self) -> Stage {
        Stage::Summarize
    }

    fn required_prior_stages(&self) -> &'static [Stage] {
        &[Stage::Scrape]
    }

    async fn process(
        &self,
        _state: &PipelineState,
        prior_artifacts: &HashMap<String, Value>,
    ) -> Result<StageResult, DiscourseError> {
        let scrape_value = prior_artifacts
            .get(Stage::Scrape.as_str())
            .ok_or_else(|| DiscourseError::internal_error("summarize requires the scrape artifact"))?;
        let scrape: ScrapeArtifact = serde_json::from_value(scrape_value.clone())?;

        let started = Instant::now();
        let original_word_count = scrape.word_count;

        let artifact = if original_word_count <= self.target_word_count {
            SummarizeArtifact::unsummarized(
                &scrape.full_text,
                original_word_count,
                self.target_word_count,
                started.elapsed().as_secs_f64(),
            )
        } else {
            let summary = Self::extractive_summary(&scrape.full_text, self.target_word_count);
            let summary_word_count = ScrapeArtifact::word_count_of(&summary);
            SummarizeArtifact::summarized(
                summary,
                original_word_count,
                summary_word_count,
                self.target_word_count,
                started.elapsed().as_secs_f64(),
            )
        };

        Ok(StageResult::new(json!(artifact)))
    }
}
