// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Entities
//!
//! Types with identity and a lifecycle, as opposed to `value_objects`. The
//! domain has exactly one: `PipelineState`, the per-item progress record
//! owned by the Journal.

pub mod pipeline_state;

pub use pipeline_state::{PipelineState, FAILED_OUTPUT_CAP_BYTES};
