// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Repositories
//!
//! The ports the Runtime and Graph Builder are written against: `StateJournal`,
//! `ArtifactStore`, `GraphStore`, and the `StageProcessor`/`DiscoverProcessor`
//! contract every stage implementation satisfies.
//!
//! ## Repository Pattern
//!
//! Keeping these as traits in the domain crate, with concrete
//! implementations living in the runtime crate's `infrastructure` module,
//! means:
//!
//! - Domain logic never depends on "is this JSONL or SQLite or Neo4j".
//! - The Runtime can be exercised against in-memory fakes in unit tests,
//!   with no filesystem or network involved.
//! - A processor is a plain function from state and prior artifacts to a
//!   result — trivial to test in isolation from the Runtime that drives it.
//!
//! ### Thread Safety
//!
//! All traits here require `Send + Sync`: the Runtime dispatches stage
//! attempts onto a bounded pool of concurrent workers (§5), so every port
//! implementation must tolerate concurrent calls from multiple tasks.

pub mod artifact_store;
pub mod graph_store;
pub mod stage_processor;
pub mod state_journal;

pub use artifact_store::ArtifactStore;
pub use graph_store::{GraphStore, UpsertOutcome};
pub use stage_processor::{
    DiscoverParams, DiscoverProcessor, DiscoveredItem, StageMetadata, StageProcessor, StageResult,
};
pub use state_journal::{StageReport, StateJournal};
