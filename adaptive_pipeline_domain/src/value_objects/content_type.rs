// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Communication content type, set at discover time and carried through
//! every later stage's artifact and file path.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Speech,
    Interview,
    Debate,
    Other,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Speech => "speech",
            ContentType::Interview => "interview",
            ContentType::Debate => "debate",
            ContentType::Other => "other",
        }
    }

    /// Path segment used before the discover stage has assigned a real
    /// content type (§4.2 path policy: `content_type` defaults to
    /// `"unknown"`).
    pub fn unknown_path_segment() -> &'static str {
        "unknown"
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
