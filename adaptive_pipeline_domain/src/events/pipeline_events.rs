// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::value_objects::{ItemId, Stage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DiscourseEvent {
    ItemDiscovered { id: ItemId, source_url: String, occurred_at: DateTime<Utc> },
    StageCompleted { id: ItemId, stage: Stage, occurred_at: DateTime<Utc> },
    StageFailed { id: ItemId, stage: Stage, error: String, occurred_at: DateTime<Utc> },
    ItemCompleted { id: ItemId, occurred_at: DateTime<Utc> },
}

impl DiscourseEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DiscourseEvent::ItemDiscovered { occurred_at, .. }
            | DiscourseEvent::StageCompleted { occurred_at, .. }
            | DiscourseEvent::StageFailed { occurred_at, .. }
            | DiscourseEvent::ItemCompleted { occurred_at, .. } => *occurred_at,
        }
    }
}
