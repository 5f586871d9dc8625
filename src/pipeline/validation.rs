// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Pipeline validation
//!
//! Structural checks for definitions. Nothing here blocks a run: the walker
//! tolerates every warning below, and a definition with errors simply
//! produces an error message when asked to run.

use std::collections::HashSet;

use crate::executors::template::{QUERY_TOKEN, TEXT_TOKEN};
use crate::pipeline::{Node, NodeKind, PipelineDefinition, PipelineGraph};

/// Pipeline validator
pub struct PipelineValidator;

impl PipelineValidator {
    /// Validate a pipeline definition
    pub fn validate(pipeline: &PipelineDefinition) -> ValidationResult {
        let mut result = ValidationResult::new();

        if pipeline.nodes.is_empty() {
            result.add_error("Pipeline has no nodes defined");
            return result;
        }

        let inputs = pipeline.input_nodes();
        match inputs.as_slice() {
            [] => result.add_error("Pipeline has no input node; runs will stop immediately"),
            [_] => {}
            [first, ..] => result.add_warning(&format!(
                "Pipeline has {} input nodes; runs start at '{}'",
                inputs.len(),
                first.id
            )),
        }

        let mut seen_ids = HashSet::new();
        for node in &pipeline.nodes {
            if !seen_ids.insert(node.id.as_str()) {
                result.add_error(&format!(
                    "Duplicate node id: '{}' (only the first definition is reachable)",
                    node.id
                ));
            }
        }

        let graph = PipelineGraph::build(pipeline);

        for (source, target) in graph.dangling_edges() {
            result.add_warning(&format!(
                "Edge '{}' -> '{}' references an unknown node",
                source, target
            ));
        }

        for id in graph.branching_nodes() {
            let targets = graph.successors(id);
            result.add_warning(&format!(
                "Node '{}' has {} outgoing edges; only the first ('{}') is followed",
                id,
                targets.len(),
                targets[0]
            ));
        }

        if graph.has_cycle() {
            result.add_warning("Pipeline contains a cycle; the walk stops at the first revisited node");
        }

        for node in &pipeline.nodes {
            Self::validate_node(node, &mut result);
        }

        if pipeline.start_node().is_some() {
            let reached: HashSet<&str> = graph.walk_path().into_iter().collect();
            for node in &pipeline.nodes {
                if !reached.contains(node.id.as_str()) {
                    result.add_warning(&format!(
                        "Node '{}' is not on the execution path and will never run",
                        node.id
                    ));
                }
            }
        }

        result
    }

    /// Validate a single node
    fn validate_node(node: &Node, result: &mut ValidationResult) {
        let token = match &node.kind {
            NodeKind::Prompt => QUERY_TOKEN,
            NodeKind::Summarizer => TEXT_TOKEN,
            NodeKind::Other(tag) if tag.is_empty() => {
                result.add_warning(&format!(
                    "Node '{}' has no type and passes its input through unchanged",
                    node.id
                ));
                return;
            }
            NodeKind::Other(tag) => {
                result.add_warning(&format!(
                    "Node '{}': unknown type '{}' passes its input through unchanged",
                    node.id, tag
                ));
                return;
            }
            _ => return,
        };

        let template = node.str_param("template");
        if template.is_empty() {
            result.add_warning(&format!(
                "Node '{}': {} node has no template and will output an empty string",
                node.id, node.kind
            ));
        } else if !template.contains(token) {
            result.add_warning(&format!(
                "Node '{}': template does not contain {} so the input is dropped",
                node.id, token
            ));
        }
    }
}

/// Result of pipeline validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
