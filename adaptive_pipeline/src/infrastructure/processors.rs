// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Processors
//!
//! Discover/scrape/summarize/categorize are external collaborators whose
//! actual crawl heuristics and LLM prompts are implementation details the
//! Runtime never needs to know about — these processors are deliberately
//! minimal, real implementations that satisfy the artifact schemas so the
//! rest of the pipeline (and its tests) has something concrete to run
//! against. Graph is the one processor implemented to full fidelity; see
//! `infrastructure::graph_builder`.

pub mod categorize;
pub mod discover;
pub mod scrape;
pub mod summarize;

pub use categorize::CategorizeProcessor;
pub use discover::SourcesFileDiscoverProcessor;
pub use scrape::ScrapeProcessor;
pub use summarize::SummarizeProcessor;
