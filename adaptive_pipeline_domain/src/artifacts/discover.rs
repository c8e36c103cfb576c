// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! One file per item discovered by the `discover` stage (§6). The Discover
//! processor is the only one that produces `id`; every later stage receives
//! it as part of `PipelineState`.

use crate::value_objects::{ContentType, ItemId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverArtifact {
    pub id: ItemId,
    pub source_url: String,
    pub content_type: ContentType,
    pub title: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub speaker: String,
}
