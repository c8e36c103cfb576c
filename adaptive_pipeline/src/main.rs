// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # DiscourseKG Composition Root
//!
//! Wires the concrete adapters into a `CommandContext`, dispatches on the
//! validated CLI command, and maps the result onto the process exit code
//! (§6). Nothing here is reusable logic — it is the one place allowed to
//! know about every concrete type in the crate at once.

use adaptive_pipeline::application::commands::{self, CommandContext};
use adaptive_pipeline::infrastructure::artifact_store::FileArtifactStore;
use adaptive_pipeline::infrastructure::config::RuntimeConfig;
use adaptive_pipeline::infrastructure::graph::Neo4jGraphStore;
use adaptive_pipeline::infrastructure::graph_builder::GraphBuilder;
use adaptive_pipeline::infrastructure::journal::JsonlStateJournal;
use adaptive_pipeline::infrastructure::logging::init_tracing;
use adaptive_pipeline::infrastructure::metrics::StageMetrics;
use adaptive_pipeline::infrastructure::processors::{
    CategorizeProcessor, ScrapeProcessor, SourcesFileDiscoverProcessor, SummarizeProcessor,
};
use adaptive_pipeline::presentation::{format_stage_report, format_status_report};
use adaptive_pipeline_bootstrap::{bootstrap_cli, result_to_exit_code, ExitCode, ValidatedCommand};
use adaptive_pipeline_domain::repositories::{GraphStore, StageReport};
use adaptive_pipeline_domain::DiscourseError;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let validated_cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("argument error: {e}");
            return ExitCode::OperatorError.into();
        }
    };

    let config = match adaptive_pipeline_bootstrap::config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::OperatorError.into();
        }
    };

    init_tracing(&config.log_level);

    let ctx = match build_command_context(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("startup error: {e}");
            return ExitCode::OperatorError.into();
        }
    };

    match validated_cli.command {
        ValidatedCommand::RunDiscover { speaker, from, to } => {
            let result = commands::run_discover(&ctx, speaker, from, to).await;
            print_stage_result("discover", result)
        }
        ValidatedCommand::RunScrape { fanout, timeout_secs } => {
            let result = commands::run_scrape(&ctx, fanout, timeout_secs).await;
            print_stage_result("scrape", result)
        }
        ValidatedCommand::RunSummarize { fanout, timeout_secs } => {
            let result = commands::run_summarize(&ctx, fanout, timeout_secs).await;
            print_stage_result("summarize", result)
        }
        ValidatedCommand::RunCategorize { fanout, timeout_secs } => {
            let result = commands::run_categorize(&ctx, fanout, timeout_secs).await;
            print_stage_result("categorize", result)
        }
        ValidatedCommand::RunGraph { fanout, timeout_secs } => {
            let result = commands::run_graph(&ctx, fanout, timeout_secs).await;
            print_stage_result("graph", result)
        }
        ValidatedCommand::Status { stage, failed } => match commands::status(&ctx, stage, failed).await {
            Ok(report) => {
                print!("{}", format_status_report(&report));
                ExitCode::Success.into()
            }
            Err(e) => {
                eprintln!("status error: {e}");
                adaptive_pipeline_bootstrap::map_error_to_exit_code(&e).into()
            }
        },
        ValidatedCommand::Invalidate { id } => match commands::invalidate(&ctx, id).await {
            Ok(()) => ExitCode::Success.into(),
            Err(e) => {
                eprintln!("invalidate error: {e}");
                adaptive_pipeline_bootstrap::map_error_to_exit_code(&e).into()
            }
        },
    }
}

fn print_stage_result(stage_name: &str, result: Result<StageReport, DiscourseError>) -> std::process::ExitCode {
    match &result {
        Ok(report) => print!("{}", format_stage_report(stage_name, report)),
        Err(e) => eprintln!("{stage_name} error: {e}"),
    }
    result_to_exit_code(result)
}

async fn build_command_context(
    config: &adaptive_pipeline_bootstrap::config::AppConfig,
) -> Result<CommandContext, DiscourseError> {
    let journal = Arc::new(JsonlStateJournal::open(config.journal_path()).await?);
    let artifacts_root = config.artifacts_root();
    let artifacts = Arc::new(FileArtifactStore::new(artifacts_root.clone()));
    let metrics = Arc::new(StageMetrics::new());

    let graph_store: Arc<dyn GraphStore> = Arc::new(
        Neo4jGraphStore::connect(&config.graph_url, &config.graph_user, &config.graph_password).await?,
    );

    let discover_processor = Arc::new(SourcesFileDiscoverProcessor::new(artifacts_root.join("sources.json")));
    let scrape_processor = Arc::new(ScrapeProcessor::new());
    let summarize_processor = Arc::new(SummarizeProcessor::default());
    let categorize_processor =
        Arc::new(CategorizeProcessor::new(artifacts_root.join("categorizations.json")));
    let graph_processor = Arc::new(GraphBuilder::new(Arc::clone(&graph_store), artifacts_root.join("speakers.json")));

    Ok(CommandContext {
        journal,
        artifacts,
        graph_store,
        metrics,
        default_runtime_config: RuntimeConfig::default(),
        discover_processor,
        scrape_processor,
        summarize_processor,
        categorize_processor,
        graph_processor,
    })
}
