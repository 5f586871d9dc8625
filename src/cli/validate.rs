// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Validate command - check pipeline definitions

use colored::Colorize;
use miette::Result;

use crate::config::Settings;
use crate::errors::LlmflowError;
use crate::pipeline::{PipelineDefinition, PipelineValidator};

/// Run the validate command
pub async fn run(settings: &Settings, name: Option<String>, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipelines...".bold());
    println!();

    let store = super::load_store(settings, verbose)?;

    let targets: Vec<(&str, &PipelineDefinition)> = match &name {
        Some(name) => {
            let pipeline = store
                .get(name)
                .ok_or_else(|| LlmflowError::PipelineNotFound { name: name.clone() })?;
            vec![(name.as_str(), pipeline)]
        }
        None => store.iter().collect(),
    };

    if targets.is_empty() {
        println!(
            "  {} No pipelines found in {}",
            "⚠".yellow(),
            settings.pipelines_dir.display()
        );
        return Ok(());
    }

    let mut invalid = 0;

    for (name, pipeline) in targets {
        let validation = PipelineValidator::validate(pipeline);

        if validation.is_valid() {
            println!("  {} {}", "✓".green(), name.bold());
        } else {
            invalid += 1;
            println!("  {} {}", "✗".red(), name.bold());
        }

        for error in &validation.errors {
            println!("      {} {}", "✗".red(), error);
        }

        for warning in &validation.warnings {
            println!("      {} {}", "⚠".yellow(), warning);
        }

        if verbose {
            println!(
                "      {}",
                format!(
                    "{} nodes, {} edges",
                    pipeline.nodes.len(),
                    pipeline.edges.len()
                )
                .dimmed()
            );
        }
    }

    println!();

    if invalid > 0 {
        Err(miette::miette!("{} pipeline(s) failed validation", invalid))
    } else {
        println!("{}", "All pipelines are valid!".green().bold());
        Ok(())
    }
}
