// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error Taxonomy
//!
//! Every failure mode in §7 of the spec has a variant here. The Runtime
//! converts any `DiscourseError` a processor returns into
//! `Journal::update_on_failure`'s `error_repr`; nothing upstream needs to
//! pattern-match on the variant to do that — `Display` is the contract.
//! `category()` and `is_recoverable()` exist for callers that *do* want to
//! branch (the CLI's `status` command groups failures by category).

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DiscourseError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("processor error: {0}")]
    ProcessorError(String),

    #[error("timeout")]
    Timeout,

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("artifact missing: {0}")]
    ArtifactMissing(String),

    #[error("artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("journal error: {0}")]
    JournalError(String),

    #[error("duplicate source_url: {0}")]
    DuplicateSourceUrl(String),

    #[error("speaker unknown: {0}")]
    SpeakerUnknown(String),

    #[error("mention duplicate: {0}")]
    MentionDuplicate(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("io error: {0}")]
    IoError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("graph store error: {0}")]
    GraphStoreError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl DiscourseError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn processor_error(msg: impl Into<String>) -> Self {
        Self::ProcessorError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether a retry of the same invocation might succeed without
    /// operator intervention. Informational only — the Runtime performs no
    /// automatic retries itself (§4.3); this is surfaced to operators and
    /// orchestrator retry policies.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiscourseError::Timeout | DiscourseError::IoError(_) | DiscourseError::GraphStoreError(_)
        )
    }

    /// Coarse category used for grouping in `status` output and metrics
    /// labels.
    pub fn category(&self) -> &'static str {
        match self {
            DiscourseError::InvalidConfiguration(_) => "configuration",
            DiscourseError::ProcessorError(_) => "processor",
            DiscourseError::Timeout => "timeout",
            DiscourseError::ValidationError(_) => "validation",
            DiscourseError::ArtifactMissing(_) => "artifact",
            DiscourseError::ArtifactCorrupt(_) => "artifact",
            DiscourseError::JournalError(_) => "journal",
            DiscourseError::DuplicateSourceUrl(_) => "duplicate",
            DiscourseError::SpeakerUnknown(_) => "graph",
            DiscourseError::MentionDuplicate(_) => "validation",
            DiscourseError::ItemNotFound(_) => "not_found",
            DiscourseError::IoError(_) => "io",
            DiscourseError::SerializationError(_) => "serialization",
            DiscourseError::GraphStoreError(_) => "graph_store",
            DiscourseError::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for DiscourseError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DiscourseError::ArtifactMissing(err.to_string()),
            _ => DiscourseError::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DiscourseError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            DiscourseError::ArtifactCorrupt(err.to_string())
        } else {
            DiscourseError::SerializationError(err.to_string())
        }
    }
}
