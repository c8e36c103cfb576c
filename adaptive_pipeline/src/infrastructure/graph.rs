// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Graph Store Adapters
//!
//! Two `GraphStore` implementations: `Neo4jGraphStore` for production,
//! talking Cypher over `neo4rs`, and `JsonFileGraphStore` for local
//! development and tests, keeping the graph as a JSON document on disk.
//! Both apply the same MERGE-on-natural-key semantics (§4.5 step 4).

pub mod json_file_store;
pub mod neo4j_store;

pub use json_file_store::JsonFileGraphStore;
pub use neo4j_store::Neo4jGraphStore;
