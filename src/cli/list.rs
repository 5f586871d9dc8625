// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! List command - show loaded pipelines

use colored::Colorize;
use miette::Result;

use crate::config::Settings;

/// Print the pipeline listing
pub async fn run(settings: &Settings, verbose: bool) -> Result<()> {
    let handler = super::command_handler(settings, verbose)?;

    println!("{}", handler.list_text());

    if verbose && !handler.store().is_empty() {
        println!();
        println!("{}:", "Sources".bold());
        for (name, pipeline) in handler.store().iter() {
            let source = handler
                .store()
                .source_of(name)
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!(
                "  - {} ({} nodes, {} edges) {}",
                name,
                pipeline.nodes.len(),
                pipeline.edges.len(),
                source.dimmed()
            );
        }
    }

    Ok(())
}
