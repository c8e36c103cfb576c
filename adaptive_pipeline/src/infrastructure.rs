// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Layer
//!
//! Concrete adapters for the ports `adaptive_pipeline_domain::repositories`
//! declares, plus the scheduler and ambient stack that drive them:
//!
//! - `journal` — `JsonlStateJournal`, the `StateJournal` implementation.
//! - `artifact_store` — `FileArtifactStore`, the `ArtifactStore` implementation.
//! - `graph` — `GraphStore` implementations: a `neo4rs`-backed Neo4j adapter
//!   and a JSON-file adapter for tests.
//! - `processors` — the per-stage `StageProcessor`/`DiscoverProcessor`
//!   implementations.
//! - `graph_builder` — the Graph Builder (§4.5): resolves speakers, upserts
//!   nodes and edges, returns a `GraphArtifact` summary.
//! - `runtime` — `PipelineRuntime`, the fan-out scheduler (§4.3, §5).
//! - `config` — runtime tuning (`RuntimeConfig`: fan-out, stage timeout).
//! - `logging` — `tracing` subscriber init and per-stage spans.
//! - `metrics` — `prometheus` counters and duration histogram.

pub mod artifact_store;
pub mod config;
pub mod graph;
pub mod graph_builder;
pub mod journal;
pub mod logging;
pub mod metrics;
pub mod processors;
pub mod runtime;
