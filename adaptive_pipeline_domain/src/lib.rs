//! # DiscourseKG Domain
//!
//! The domain layer of the pipeline: pure business logic for tracking a
//! communication through a fixed sequence of processing stages and
//! assembling the resulting knowledge graph. Independent of any storage
//! technology, HTTP client, or LLM SDK — those all live behind the traits
//! in `repositories`.
//!
//! ## Module Structure
//!
//! - `entities` — `PipelineState`, the one type with identity and a
//!   lifecycle in this domain.
//! - `value_objects` — `ItemId`, `Stage`, `ContentType`, `EntityType`,
//!   `Topic`, `Sentiment`, `FanOut`: immutable, self-validating types.
//! - `artifacts` — the normative per-stage JSON schemas (§6): what
//!   `discover`, `scrape`, `summarize`, `categorize`, and `graph` persist.
//! - `graph` — the node and edge types the Graph Builder upserts, and the
//!   natural-key normalization they share.
//! - `services` — stateless pure functions, currently sentiment
//!   aggregation.
//! - `repositories` — the ports: `StateJournal`, `ArtifactStore`,
//!   `GraphStore`, `StageProcessor`, `DiscoverProcessor`.
//! - `events` — lightweight notifications the Runtime emits for logging
//!   and metrics to hook into.
//! - `error` — `DiscourseError`, the domain's single error type.
//!
//! ## Domain-Driven Design Concepts
//!
//! ### Entities
//! `PipelineState` has identity (`ItemId`) that persists across every
//! mutation the Journal applies to it as the item advances.
//!
//! ### Value Objects
//! Everything else that carries no identity of its own — `Stage`,
//! `ContentType`, `FanOut` — is a value object: immutable, equal by
//! attributes, self-validating at construction.
//!
//! ### Domain Services
//! `services::aggregate` computes a Mention's sentiment distribution from
//! its Subjects with no side effects and no dependency on the Journal or
//! graph store.
//!
//! ### Repositories
//! `repositories` defines the storage-agnostic contracts the Runtime and
//! Graph Builder are written against; concrete implementations (JSONL
//! journal, file-backed artifact store, Neo4j graph store) live in the
//! runtime crate's `infrastructure` module.
//!
//! ### Domain Events
//! `events::DiscourseEvent` variants mark stage completions and failures
//! for consumers that want to observe progress without coupling to
//! Runtime internals.

pub mod artifacts;
pub mod entities;
pub mod error;
pub mod events;
pub mod graph;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::PipelineState;
pub use error::DiscourseError;
pub use events::DiscourseEvent;
pub use value_objects::{ContentType, EntityType, FanOut, ItemId, Sentiment, Stage, Topic};
