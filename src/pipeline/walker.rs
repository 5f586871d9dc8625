// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Single-path graph walker
//!
//! Follows the first outgoing edge of each node, dispatching every node it
//! lands on exactly once. The walk stops at a node with no outgoing edge, at
//! an edge whose target does not exist, or on reaching a node already
//! visited. Branches beyond the first edge are never taken.

use std::collections::HashSet;

use crate::errors::LlmflowError;
use crate::executors::NodeDispatcher;
use crate::pipeline::{ExecutionContext, Node, PipelineGraph};

/// Result of one walk
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// Final running value
    pub output: String,
    /// Ids of dispatched nodes, in order
    pub visited: Vec<String>,
}

/// Walks a pipeline graph from a start node
pub struct GraphWalker<'d> {
    dispatcher: &'d NodeDispatcher,
}

impl<'d> GraphWalker<'d> {
    pub fn new(dispatcher: &'d NodeDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run the walk, threading `initial` through every visited node
    pub async fn run(
        &self,
        graph: &PipelineGraph<'_>,
        start: Option<&Node>,
        initial: String,
        context: &mut ExecutionContext,
    ) -> Result<WalkOutcome, LlmflowError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut trace = Vec::new();
        let mut value = initial;
        let mut current = start;

        while let Some(node) = current {
            if !visited.insert(node.id.as_str()) {
                tracing::debug!(node = %node.id, "node already visited, stopping");
                break;
            }

            value = self.dispatcher.execute(node, &value, context).await?;
            trace.push(node.id.clone());

            current = graph.next_node(&node.id);
        }

        Ok(WalkOutcome {
            output: value,
            visited: trace,
        })
    }
}
