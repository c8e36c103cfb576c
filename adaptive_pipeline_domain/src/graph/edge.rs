// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The four directed edge types the graph ever contains (§3). No other
//! relationship exists; the Graph Builder never constructs an `Edge` whose
//! endpoints aren't already-upserted node keys.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Edge {
    /// `Speaker —DELIVERED→ Communication`.
    Delivered { speaker_key: String, communication_key: String },
    /// `Communication —HAS_MENTION→ Mention`.
    HasMention { communication_key: String, mention_key: String },
    /// `Mention —REFERS_TO→ Entity`.
    RefersTo { mention_key: String, entity_key: String },
    /// `Mention —HAS_SUBJECT→ Subject`.
    HasSubject { mention_key: String, subject_key: String },
}

impl Edge {
    /// Machine-stable relationship type name, used by graph store adapters
    /// that need it as a literal (e.g. Cypher relationship labels).
    pub fn relationship_type(&self) -> &'static str {
        match self {
            Edge::Delivered { .. } => "DELIVERED",
            Edge::HasMention { .. } => "HAS_MENTION",
            Edge::RefersTo { .. } => "REFERS_TO",
            Edge::HasSubject { .. } => "HAS_SUBJECT",
        }
    }
}
