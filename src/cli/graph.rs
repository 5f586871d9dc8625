// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Graph command - visualize a pipeline as a graph

use miette::Result;

use super::GraphFormat;
use crate::config::Settings;
use crate::errors::LlmflowError;
use crate::pipeline::PipelineGraph;

/// Run the graph command
pub async fn run(settings: &Settings, name: String, format: GraphFormat, verbose: bool) -> Result<()> {
    let store = super::load_store(settings, verbose)?;

    let pipeline = store
        .get(&name)
        .ok_or(LlmflowError::PipelineNotFound { name: name.clone() })?;

    let graph = PipelineGraph::build(pipeline);

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    print!("{}", output);

    Ok(())
}
