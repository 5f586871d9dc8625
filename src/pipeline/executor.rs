// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Pipeline executor
//!
//! Runs one pipeline definition against one input value.

use std::time::{Duration, Instant};

use crate::errors::LlmflowError;
use crate::executors::NodeDispatcher;
use crate::pipeline::{ExecutionContext, GraphWalker, PipelineDefinition, PipelineGraph};

/// Result of running a pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Final output text
    pub output: String,
    /// Ids of the nodes that ran, in order
    pub visited: Vec<String>,
    /// Total execution time
    pub duration: Duration,
}

/// Pipeline executor
#[derive(Clone, Default)]
pub struct PipelineExecutor {
    dispatcher: NodeDispatcher,
}

impl PipelineExecutor {
    /// Create an executor with the placeholder node capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor around a configured dispatcher
    pub fn with_dispatcher(dispatcher: NodeDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Execute a pipeline
    ///
    /// The run starts at the first `input` node in definition order. A
    /// definition without one is rejected before anything is dispatched.
    pub async fn execute(
        &self,
        pipeline: &PipelineDefinition,
        input: &str,
    ) -> Result<PipelineResult, LlmflowError> {
        let start = Instant::now();

        let start_node = pipeline
            .start_node()
            .ok_or_else(|| LlmflowError::NoInputNode {
                pipeline: pipeline.display_name().to_string(),
            })?;

        let graph = PipelineGraph::build(pipeline);
        let mut context = ExecutionContext::new();

        tracing::info!(
            pipeline = pipeline.display_name(),
            start = %start_node.id,
            "running pipeline"
        );

        let outcome = GraphWalker::new(&self.dispatcher)
            .run(&graph, Some(start_node), input.to_string(), &mut context)
            .await?;

        let duration = start.elapsed();
        tracing::debug!(
            pipeline = pipeline.display_name(),
            nodes = outcome.visited.len(),
            elapsed_ms = duration.as_millis() as u64,
            "pipeline finished"
        );

        Ok(PipelineResult {
            output: outcome.output,
            visited: outcome.visited,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"{
        "name": "demo",
        "nodes": [
            {"id": "1", "type": "input"},
            {"id": "2", "type": "prompt", "params": {"template": "Hi {{query}}"}}
        ],
        "edges": [{"source": "1", "target": "2"}]
    }"#;

    #[tokio::test]
    async fn test_demo_pipeline() {
        let pipeline = PipelineDefinition::from_json(DEMO).unwrap();
        let result = PipelineExecutor::new().execute(&pipeline, "Bob").await.unwrap();

        assert_eq!(result.output, "Hi Bob");
        assert_eq!(result.visited, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_no_input_node() {
        let pipeline = PipelineDefinition::from_json(
            r#"{"name": "headless", "nodes": [{"id": "p", "type": "prompt"}]}"#,
        )
        .unwrap();

        let err = PipelineExecutor::new()
            .execute(&pipeline, "ignored")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmflowError::NoInputNode { ref pipeline } if pipeline == "headless"));
    }

    #[tokio::test]
    async fn test_full_chain() {
        let pipeline = PipelineDefinition::from_json(
            r#"{
                "nodes": [
                    {"id": "out", "type": "output"},
                    {"id": "in", "type": "input"},
                    {"id": "rag", "type": "rag"},
                    {"id": "p", "type": "prompt", "params": {"template": "Context: {{query}}"}},
                    {"id": "llm", "type": "llm"},
                    {"id": "sum", "type": "summarizer", "params": {"template": "TL;DR {{text}}"}}
                ],
                "edges": [
                    {"source": "in", "target": "rag"},
                    {"source": "rag", "target": "p"},
                    {"source": "p", "target": "llm"},
                    {"source": "llm", "target": "sum"},
                    {"source": "sum", "target": "out"}
                ]
            }"#,
        )
        .unwrap();

        let result = PipelineExecutor::new().execute(&pipeline, "q").await.unwrap();
        assert_eq!(
            result.output,
            "TL;DR LLM response to: Context: RAG enhanced: q"
        );
        assert_eq!(result.visited, vec!["in", "rag", "p", "llm", "sum", "out"]);
    }
}
