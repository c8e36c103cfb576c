// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Output of the `graph` stage (§6): a summary of what the Graph Builder
//! upserted for one item, not the graph data itself (that lives in the
//! graph store).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphArtifact {
    pub nodes_created: u32,
    pub nodes_merged: u32,
    pub edges_created: u32,
    pub mention_count: u32,
    pub subject_count: u32,
    pub warnings: Vec<String>,
}
