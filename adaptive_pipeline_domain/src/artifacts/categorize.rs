// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Output of the `categorize` stage (§6): the entities an LLM found in a
//! transcript, the topics under which each was discussed, and the subjects
//! and sentiment attached to each topic. `validate` enforces every
//! structural rule the Graph Builder otherwise assumes holds; run it before
//! handing a `CategorizeArtifact` to the graph stage.

use crate::value_objects::{EntityType, Sentiment, Topic};
use crate::DiscourseError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizeArtifact {
    pub entities: Vec<EntityMention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub entity_name: String,
    pub entity_type: EntityType,
    pub mentions: Vec<TopicMention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMention {
    pub topic: Topic,
    pub context: String,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub subject_name: String,
    pub sentiment: Sentiment,
    pub quotes: Vec<String>,
}

const CONTEXT_MIN_LEN: usize = 10;
const CONTEXT_MAX_LEN: usize = 500;
const SUBJECT_NAME_MIN_TOKENS: usize = 2;
const SUBJECT_NAME_MAX_TOKENS: usize = 3;
const QUOTES_MIN: usize = 1;
const QUOTES_MAX: usize = 6;

impl CategorizeArtifact {
    /// Validates every structural rule the Graph Builder relies on:
    /// unique entity names, unique topics per entity, `context` length,
    /// `subject_name` token count, and `quotes` length. All strings are
    /// assumed already trimmed by this point — callers should trim on
    /// ingestion, not here, since this only validates shape.
    pub fn validate(&self) -> Result<(), DiscourseError> {
        let mut seen_entities: HashSet<&str> = HashSet::new();
        for entity in &self.entities {
            let trimmed_name = entity.entity_name.trim();
            if trimmed_name.is_empty() {
                return Err(DiscourseError::validation_error(
                    "entity_name must not be empty",
                ));
            }
            if !seen_entities.insert(trimmed_name) {
                return Err(DiscourseError::validation_error(format!(
                    "duplicate entity_name: {trimmed_name}"
                )));
            }

            let mut seen_topics: HashSet<Topic> = HashSet::new();
            for mention in &entity.mentions {
                if !seen_topics.insert(mention.topic) {
                    return Err(DiscourseError::validation_error(format!(
                        "duplicate topic {} for entity {trimmed_name}",
                        mention.topic
                    )));
                }
                mention.validate()?;
            }
        }
        Ok(())
    }
}

impl TopicMention {
    fn validate(&self) -> Result<(), DiscourseError> {
        let len = self.context.trim().chars().count();
        if !(CONTEXT_MIN_LEN..=CONTEXT_MAX_LEN).contains(&len) {
            return Err(DiscourseError::validation_error(format!(
                "context must be {CONTEXT_MIN_LEN}-{CONTEXT_MAX_LEN} chars, got {len}"
            )));
        }
        if self.subjects.is_empty() {
            return Ok(());
        }
        for subject in &self.subjects {
            subject.validate()?;
        }
        Ok(())
    }
}

impl Subject {
    fn validate(&self) -> Result<(), DiscourseError> {
        let tokens = self.subject_name.split_whitespace().count();
        if !(SUBJECT_NAME_MIN_TOKENS..=SUBJECT_NAME_MAX_TOKENS).contains(&tokens) {
            return Err(DiscourseError::validation_error(format!(
                "subject_name must be {SUBJECT_NAME_MIN_TOKENS}-{SUBJECT_NAME_MAX_TOKENS} \
                 whitespace-separated tokens, got {tokens} in {:?}",
                self.subject_name
            )));
        }
        if !(QUOTES_MIN..=QUOTES_MAX).contains(&self.quotes.len()) {
            return Err(DiscourseError::validation_error(format!(
                "quotes must have {QUOTES_MIN}-{QUOTES_MAX} entries, got {}",
                self.quotes.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_subject() -> Subject {
        Subject {
            subject_name: "interest rates".into(),
            sentiment: Sentiment::Negative,
            quotes: vec!["rates are too high".into()],
        }
    }

    fn valid_mention() -> TopicMention {
        TopicMention {
            topic: Topic::Economics,
            context: "discussing monetary policy at length".into(),
            subjects: vec![valid_subject()],
        }
    }

    fn valid_artifact() -> CategorizeArtifact {
        CategorizeArtifact {
            entities: vec![EntityMention {
                entity_name: "Federal Reserve".into(),
                entity_type: EntityType::Organization,
                mentions: vec![valid_mention()],
            }],
        }
    }

    #[test]
    fn well_formed_artifact_passes_validation() {
        valid_artifact().validate().unwrap();
    }

    #[test]
    fn duplicate_entity_names_are_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities.push(artifact.entities[0].clone());
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn duplicate_topics_within_one_entity_are_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions.push(valid_mention());
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn context_too_short_is_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].context = "short".into();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn subject_name_with_one_token_is_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].subjects[0].subject_name = "rates".into();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn subject_name_with_four_tokens_is_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].subjects[0].subject_name =
            "way too many words here".into();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn empty_quotes_is_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].subjects[0].quotes = vec![];
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn seven_quotes_is_rejected() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].subjects[0].quotes =
            (0..7).map(|i| format!("quote {i}")).collect();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn topic_with_zero_subjects_is_allowed() {
        let mut artifact = valid_artifact();
        artifact.entities[0].mentions[0].subjects = vec![];
        artifact.validate().unwrap();
    }
}
