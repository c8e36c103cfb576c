// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Node types the Graph Builder upserts (§3). Each carries its natural key
//! as a regular field rather than a separate id type — the graph store
//! adapter is what turns `key()` into a `MERGE` clause, so the domain only
//! needs to expose it consistently.

use crate::graph::key::{mention_key, normalize_key};
use crate::value_objects::{ContentType, EntityType, Sentiment, Topic};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub display_name: String,
    pub role: String,
    pub organization: String,
    pub industry: String,
    pub region: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub influence_score: Option<f64>,
}

impl Speaker {
    /// Natural key: the case-folded, trimmed speaker name.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub id: String,
    pub title: Option<String>,
    pub content_type: ContentType,
    pub content_date: Option<NaiveDate>,
    pub source_url: String,
    pub full_text: String,
    pub word_count: u64,
    pub was_summarized: bool,
    pub compression_ratio: Option<f64>,
}

impl Communication {
    /// Natural key: the item id, unique across the environment.
    pub fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub canonical_name: String,
    pub entity_type: EntityType,
}

impl Entity {
    /// Natural key: the normalized `canonical_name`. Callers must already
    /// have normalized `canonical_name` via `graph::key::normalize_key`
    /// before constructing this node.
    pub fn key(&self) -> &str {
        &self.canonical_name
    }
}

/// `aggregated_sentiment[sentiment] = (count, proportion)`, computed by
/// `crate::services::sentiment::aggregate` from a Mention's Subjects.
pub type AggregatedSentiment = HashMap<Sentiment, SentimentStat>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentStat {
    pub count: u32,
    pub prop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub communication_id: String,
    pub entity_canonical_name: String,
    pub topic: Topic,
    pub context: String,
    pub aggregated_sentiment: AggregatedSentiment,
}

impl Mention {
    /// Natural key: `(Communication.id, Entity.canonical_name, topic)`.
    pub fn key(&self) -> String {
        mention_key(&self.communication_id, &self.entity_canonical_name, self.topic.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub mention_key: String,
    pub subject_name: String,
    pub sentiment: Sentiment,
    pub quotes: Vec<String>,
}

impl Subject {
    /// Natural key: `(Mention_key, subject_name)`, subject name normalized.
    pub fn key(&self) -> String {
        crate::graph::key::subject_key(&self.mention_key, &self.subject_name)
    }
}
