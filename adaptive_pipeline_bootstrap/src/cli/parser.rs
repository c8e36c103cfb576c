// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Structure
//!
//! The raw `clap`-derived surface (§6). `cli::validator` turns this into a
//! `ValidatedCli` with every argument range-checked; nothing here enforces
//! invariants beyond what `clap` itself can express.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "discoursekg", version, about = "Knowledge-graph pipeline for public communications")]
pub struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to a config file overriding environment-variable configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive one stage across all items ready for it.
    Run {
        #[command(subcommand)]
        stage: StageCommand,
    },
    /// Report item counts by `next_stage`, optionally filtered.
    Status {
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        failed: bool,
    },
    /// Mark an item invalidated, excluding it from future stage runs.
    Invalidate {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StageCommand {
    Discover {
        #[arg(long)]
        speaker: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    Scrape {
        #[arg(long)]
        fanout: Option<usize>,
        #[arg(long)]
        timeout: Option<u64>,
    },
    Summarize {
        #[arg(long)]
        fanout: Option<usize>,
        #[arg(long)]
        timeout: Option<u64>,
    },
    Categorize {
        #[arg(long)]
        fanout: Option<usize>,
        #[arg(long)]
        timeout: Option<u64>,
    },
    Graph {
        #[arg(long)]
        fanout: Option<usize>,
        #[arg(long)]
        timeout: Option<u64>,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
