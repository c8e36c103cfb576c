// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # DiscourseKG Runtime
//!
//! The application, infrastructure, and presentation layers for DiscourseKG:
//! a pipeline that discovers, scrapes, summarizes, categorizes, and
//! assembles a knowledge graph from public communications by tracked
//! speakers. Domain logic (entities, value objects, the port traits) lives
//! in `adaptive_pipeline_domain`; this crate provides the concrete adapters
//! and the scheduler that drives them, plus the `discoursekg` binary's
//! supporting library code. Command-line parsing and environment
//! configuration live in `adaptive_pipeline_bootstrap`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Presentation Layer                         │
//! │  (status/report formatting for the CLI)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Layer                          │
//! │  (CommandContext, one function per ValidatedCommand)        │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! │  (adaptive_pipeline_domain: entities, value objects, ports)  │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Infrastructure Layer                         │
//! │  (JSONL journal, file artifact store, Neo4j/JSON graph      │
//! │   stores, stage processors, the PipelineRuntime scheduler)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Pipeline Runtime
//! `infrastructure::runtime::PipelineRuntime` drives one stage across every
//! item ready for it, bounded by a configurable fan-out and per-item
//! timeout (§4.3, §5 of the design). `run_discover` is the special-cased
//! entry point that creates new items; `run_stage` advances existing ones.
//!
//! ### Stages
//! Discover, Scrape, Summarize, Categorize, and Graph run in a fixed
//! sequence (`adaptive_pipeline_domain::value_objects::Stage`). Discover,
//! Scrape, Summarize, and Categorize are intentionally minimal real
//! implementations (`infrastructure::processors`); the Graph stage
//! (`infrastructure::graph_builder::GraphBuilder`) is implemented to full
//! fidelity, since assembling the knowledge graph correctly is this
//! system's reason for existing.
//!
//! ### Journal and Artifact Store
//! `infrastructure::journal::JsonlStateJournal` is the durable record of
//! every item's progress; `infrastructure::artifact_store::FileArtifactStore`
//! persists each stage's JSON output at a deterministic path. Both are
//! write-temp-then-rename for crash safety.
//!
//! ## Error Handling
//!
//! Every fallible operation returns `adaptive_pipeline_domain::DiscourseError`,
//! a `thiserror`-based taxonomy covering processor failures, timeouts,
//! validation failures, and storage errors. `CommandContext`'s functions
//! return `Result<StageReport, DiscourseError>`; the bootstrap crate's
//! `result_to_exit_code` maps that onto the CLI's exit code contract.
//!
//! ## Observability
//!
//! `infrastructure::logging::init_tracing` wires a `tracing_subscriber`
//! honoring `LOG_LEVEL`; `infrastructure::metrics::StageMetrics` exposes
//! per-stage item counts and a duration histogram via `prometheus`.

pub mod application;
pub mod infrastructure;
pub mod presentation;

// Tests are organized as:
// - Unit tests: #[cfg(test)] modules within each source file
// - Integration tests: separate files in tests/ directory

pub use application::commands::CommandContext;
pub use infrastructure::runtime::PipelineRuntime;
