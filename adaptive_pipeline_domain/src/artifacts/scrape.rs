// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Output of the `scrape` stage (§6): the extracted transcript text plus
//! whatever metadata the web source surfaced about the communication.

use crate::value_objects::ContentType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeArtifact {
    pub full_text: String,
    pub word_count: u64,
    pub title: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub content_type: ContentType,
    pub source_url: String,
}

impl ScrapeArtifact {
    /// Computes `word_count` from `full_text` by whitespace splitting, the
    /// same notion of "word" the Summarize and Graph stages use for their
    /// own counts.
    pub fn word_count_of(full_text: &str) -> u64 {
        full_text.split_whitespace().count() as u64
    }
}
