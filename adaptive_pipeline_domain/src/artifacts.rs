// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Artifacts
//!
//! The normative JSON schema each stage persists (§6). These are the only
//! types the Artifact Store serializes; the Journal never sees them
//! directly, only the paths the Runtime records in `file_paths`.

pub mod categorize;
pub mod discover;
pub mod graph_report;
pub mod scrape;
pub mod summarize;

pub use categorize::{CategorizeArtifact, EntityMention, Subject, TopicMention};
pub use discover::DiscoverArtifact;
pub use graph_report::GraphArtifact;
pub use scrape::ScrapeArtifact;
pub use summarize::SummarizeArtifact;
