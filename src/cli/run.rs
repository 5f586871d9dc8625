// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Run command - execute one pipeline on an input string

use colored::Colorize;
use miette::Result;

use crate::config::Settings;
use crate::errors::LlmflowError;
use crate::pipeline::PipelineExecutor;

/// Run a pipeline by name
pub async fn run(
    settings: &Settings,
    name: String,
    input: String,
    trace: bool,
    verbose: bool,
) -> Result<()> {
    let store = super::load_store(settings, verbose)?;

    let pipeline = store
        .get(&name)
        .ok_or_else(|| LlmflowError::PipelineNotFound { name: name.clone() })?;

    let result = PipelineExecutor::new().execute(pipeline, &input).await?;

    if trace || verbose {
        eprintln!("{}: {}", "Pipeline".bold(), name);
        eprintln!("{}", "═".repeat(50));
        for (i, id) in result.visited.iter().enumerate() {
            let kind = pipeline
                .get_node(id)
                .map(|n| n.kind.to_string())
                .unwrap_or_default();
            eprintln!("  {}. {} ({})", i + 1, id.bold(), kind);
        }
        eprintln!(
            "{}",
            format!(
                "Completed {} node(s) in {:.3}s",
                result.visited.len(),
                result.duration.as_secs_f64()
            )
            .green()
        );
        eprintln!();
    }

    println!("{}", result.output);

    Ok(())
}
