// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for llmflow.

pub mod ask;
pub mod graph;
pub mod list;
pub mod respond;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::host::CommandHandler;
use crate::pipeline::PipelineStore;

/// LLM pipeline executor
///
/// Load pipeline-builder JSON definitions and run them from chat commands.
#[derive(Parser, Debug)]
#[clap(
    name = "llmflow",
    version,
    about = "Run LLM pipeline-builder JSON definitions from chat commands",
    long_about = None,
    after_help = "Examples:\n\
        llmflow list                                List loaded pipelines\n\
        llmflow run demo --input \"Bob\"              Run a pipeline\n\
        llmflow ask run pipeline: demo with input: Bob\n\
        llmflow respond < request.json              Answer a chat-completion request\n\n\
        See 'llmflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Directory holding pipeline JSON files (overrides PIPELINES_DIR)
    #[clap(long, global = true, value_name = "DIR")]
    pub pipelines_dir: Option<PathBuf>,

    /// Settings file (defaults to ./llmflow.toml when present)
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List loaded pipelines
    List,

    /// Run a pipeline on an input string
    Run {
        /// Pipeline name
        name: String,

        /// Input text
        #[clap(short, long, default_value = "")]
        input: String,

        /// Print the ids of the nodes that ran
        #[clap(long)]
        trace: bool,
    },

    /// Answer a free-form chat message
    Ask {
        /// Message text, e.g. "run pipeline: demo with input: hi"
        #[clap(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Answer a chat-completion request (JSON) and print the response (JSON)
    Respond {
        /// Request file (default: stdin)
        #[clap(short, long)]
        request: Option<PathBuf>,
    },

    /// Validate pipeline definitions
    Validate {
        /// Pipeline to validate (default: all)
        name: Option<String>,
    },

    /// Show a pipeline as a graph
    Graph {
        /// Pipeline name
        name: String,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

/// Resolve settings for this invocation
pub fn settings(cli: &Cli) -> Result<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(settings.with_pipelines_dir(cli.pipelines_dir.clone()))
}

/// Load every pipeline from the configured directory
///
/// Malformed files are reported and skipped.
pub fn load_store(settings: &Settings, verbose: bool) -> Result<Arc<PipelineStore>> {
    settings.prepare_pipelines_dir()?;

    let (store, report) = PipelineStore::load_dir(&settings.pipelines_dir)?;

    if !report.failed.is_empty() {
        eprintln!("{}", "Some pipeline files could not be loaded:".yellow().bold());
        for (path, error) in &report.failed {
            eprintln!("  {} {}", "⚠".yellow(), path.display());
            if verbose {
                eprintln!("    {}", error.dimmed());
            }
        }
        eprintln!();
    }

    for name in &report.overwritten {
        eprintln!(
            "  {} pipeline '{}' is defined more than once; the last file wins",
            "⚠".yellow(),
            name
        );
    }

    Ok(Arc::new(store))
}

/// Build the command handler used by the chat-facing subcommands
pub fn command_handler(settings: &Settings, verbose: bool) -> Result<CommandHandler> {
    let store = load_store(settings, verbose)?;
    Ok(CommandHandler::new(store).with_pipelines_dir(settings.pipelines_dir_label()))
}
