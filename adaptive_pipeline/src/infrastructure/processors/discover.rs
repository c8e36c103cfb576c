// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Source-List Discover Processor
//!
//! Stands in for a production discover stage's search/RSS crawl: reads a
//! speaker's known sources from a local `sources.json` fixture and returns
//! the ones whose `content_date` falls in the requested range. A real
//! deployment would replace this with a crawler; the `DiscoverProcessor`
//! trait boundary is exactly where that swap happens.

use adaptive_pipeline_domain::repositories::{DiscoverParams, DiscoverProcessor, DiscoveredItem};
use adaptive_pipeline_domain::value_objects::ContentType;
use adaptive_pipeline_domain::DiscourseError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
struct SourceEntry {
    source_url: String,
    content_type: ContentType,
    title: Option<String>,
    content_date: Option<NaiveDate>,
}

pub struct SourcesFileDiscoverProcessor {
    path: PathBuf,
}

impl SourcesFileDiscoverProcessor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_sources(&self) -> Result<HashMap<String, Vec<SourceEntry>>, DiscourseError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let sources = serde_json::from_slice(&bytes)?;
        Ok(sources)
    }
}

#[async_trait]
impl DiscoverProcessor for SourcesFileDiscoverProcessor {
    async fn discover(&self, params: &DiscoverParams) -> Result<Vec<DiscoveredItem>, DiscourseError> {
        let sources = self.load_sources().await?;
        let entries = sources.get(&params.speaker).cloned().unwrap_or_default();

        let items = entries
            .into_iter()
            .filter(|entry| match entry.content_date {
                Some(date) => date >= params.start_date && date <= params.end_date,
                None => true,
            })
            .map(|entry| DiscoveredItem {
                source_url: entry.source_url.clone(),
                content_type: entry.content_type,
                title: entry.title.clone(),
                content_date: entry.content_date,
                artifact: json!({
                    "source_url": entry.source_url,
                    "content_type": entry.content_type,
                    "title": entry.title,
                    "content_date": entry.content_date,
                    "speaker": params.speaker,
                }),
            })
            .collect();

        Ok(items)
    }
}
