// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Output of the `summarize` stage (§6). When the processor decides a
//! transcript is short enough that summarizing it is pointless,
//! `was_summarized` is `false`: `summary` is a verbatim copy of the input
//! text and `compression_ratio` is absent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeArtifact {
    pub summary: String,
    pub was_summarized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_ratio: Option<f64>,
    pub original_word_count: u64,
    pub summary_word_count: u64,
    pub target_word_count: u64,
    pub processing_time_seconds: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SummarizeArtifact {
    /// Builds the artifact for the "skipped, text was already short enough"
    /// path: `summary` is the original text verbatim, no compression ratio.
    pub fn unsummarized(
        full_text: &str,
        original_word_count: u64,
        target_word_count: u64,
        processing_time_seconds: f64,
    ) -> Self {
        Self {
            summary: full_text.to_string(),
            was_summarized: false,
            compression_ratio: None,
            original_word_count,
            summary_word_count: original_word_count,
            target_word_count,
            processing_time_seconds,
            success: true,
            error_message: None,
        }
    }

    /// Builds the artifact for a successful summarization, computing
    /// `compression_ratio = summary_word_count / original_word_count`.
    pub fn summarized(
        summary: String,
        original_word_count: u64,
        summary_word_count: u64,
        target_word_count: u64,
        processing_time_seconds: f64,
    ) -> Self {
        let ratio = if original_word_count > 0 {
            Some(summary_word_count as f64 / original_word_count as f64)
        } else {
            None
        };
        Self {
            summary,
            was_summarized: true,
            compression_ratio: ratio,
            original_word_count,
            summary_word_count,
            target_word_count,
            processing_time_seconds,
            success: true,
            error_message: None,
        }
    }
}
