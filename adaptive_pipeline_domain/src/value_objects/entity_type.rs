// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Classification of an `Entity` node, assigned by the categorize stage and
//! read by the Graph Builder. Conflicting assignments across items are
//! resolved first-write-wins (§4.5 step 3a; see DESIGN.md).

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Organization,
    Location,
    Person,
    Program,
    Product,
    Event,
    Other,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Organization => "organization",
            EntityType::Location => "location",
            EntityType::Person => "person",
            EntityType::Program => "program",
            EntityType::Product => "product",
            EntityType::Event => "event",
            EntityType::Other => "other",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
