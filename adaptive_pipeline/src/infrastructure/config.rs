// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Configuration
//!
//! Runtime tuning that sits below `adaptive_pipeline_bootstrap::config::AppConfig`:
//! the fan-out `F` and per-stage timeout the `PipelineRuntime` scheduler uses,
//! centralized in one validated struct rather than passed around as loose
//! arguments.

pub mod runtime_config;

pub use runtime_config::RuntimeConfig;
