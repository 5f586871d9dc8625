// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! llmflow - LLM pipeline executor
//!
//! Run pipeline-builder JSON definitions from chat commands.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llmflow::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llmflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    let settings = llmflow::cli::settings(&cli)?;

    match cli.command {
        Commands::List => llmflow::cli::list::run(&settings, cli.verbose).await,
        Commands::Run { name, input, trace } => {
            llmflow::cli::run::run(&settings, name, input, trace, cli.verbose).await
        }
        Commands::Ask { message } => llmflow::cli::ask::run(&settings, message, cli.verbose).await,
        Commands::Respond { request } => {
            llmflow::cli::respond::run(&settings, request, cli.verbose).await
        }
        Commands::Validate { name } => {
            llmflow::cli::validate::run(&settings, name, cli.verbose).await
        }
        Commands::Graph { name, format } => {
            llmflow::cli::graph::run(&settings, name, format, cli.verbose).await
        }
    }
}
