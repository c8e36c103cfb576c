// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Topic under which an entity is discussed within one communication. Part
//! of the `Mention` natural key `(Communication.id, Entity.canonical_name,
//! topic)` — two `TopicMention`s with the same topic under the same entity
//! in one categorize artifact is a `MENTION_DUPLICATE` validation failure.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Economics,
    Technology,
    ForeignAffairs,
    Healthcare,
    Energy,
    Defense,
    Social,
    Regulation,
    Other,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Economics => "economics",
            Topic::Technology => "technology",
            Topic::ForeignAffairs => "foreign_affairs",
            Topic::Healthcare => "healthcare",
            Topic::Energy => "energy",
            Topic::Defense => "defense",
            Topic::Social => "social",
            Topic::Regulation => "regulation",
            Topic::Other => "other",
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
