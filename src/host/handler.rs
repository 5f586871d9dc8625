// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Command facade
//!
//! Turns a chat message into response text. Every outcome, including unknown
//! pipelines and failed runs, comes back as a string.

use std::sync::Arc;

use crate::command::{interpret, Intent};
use crate::errors::LlmflowError;
use crate::host::{ChatCompletionRequest, ChatCompletionResponse};
use crate::pipeline::{PipelineExecutor, PipelineStore};

/// Usage line shared by the help and listing texts
pub const RUN_USAGE: &str = "run pipeline: <pipeline_name> with input: <your input>";

/// Answers chat commands against a loaded store
#[derive(Clone)]
pub struct CommandHandler {
    store: Arc<PipelineStore>,
    executor: PipelineExecutor,
    pipelines_dir: String,
}

impl CommandHandler {
    /// Create a handler with the placeholder node capabilities
    pub fn new(store: Arc<PipelineStore>) -> Self {
        Self {
            store,
            executor: PipelineExecutor::new(),
            pipelines_dir: "pipeline_configs".to_string(),
        }
    }

    /// Use a configured executor
    pub fn with_executor(mut self, executor: PipelineExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Directory name mentioned in help texts
    pub fn with_pipelines_dir(mut self, dir: impl Into<String>) -> Self {
        self.pipelines_dir = dir.into();
        self
    }

    pub fn store(&self) -> &PipelineStore {
        &self.store
    }

    /// Answer a host request
    pub async fn process_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> ChatCompletionResponse {
        let content = match request.first_user_message() {
            Some(message) if !message.is_empty() => self.handle(message).await,
            _ => "No user message found in the request.".to_string(),
        };

        ChatCompletionResponse::from_text(content)
    }

    /// Answer one chat message
    pub async fn handle(&self, message: &str) -> String {
        match interpret(message) {
            Intent::Help => self.help_text(),
            Intent::ListPipelines => self.list_text(),
            Intent::RunPipeline { name, input } => self.run_text(&name, &input).await,
        }
    }

    /// Run a pipeline and render the outcome as text
    pub async fn run_text(&self, name: &str, input: &str) -> String {
        let Some(pipeline) = self.store.get(name) else {
            return format!("Error: Pipeline '{}' not found.", name);
        };

        match self.executor.execute(pipeline, input).await {
            Ok(result) => result.output,
            Err(LlmflowError::NoInputNode { .. }) => {
                "Error: No input nodes found in the pipeline.".to_string()
            }
            Err(e) => {
                tracing::error!("Error executing pipeline: {}", e);
                format!("Error executing pipeline: {}", e)
            }
        }
    }

    /// Listing of every loaded pipeline
    pub fn list_text(&self) -> String {
        if self.store.is_empty() {
            return format!(
                "No pipelines available. Upload JSON pipeline configurations to the {} directory.",
                self.pipelines_dir
            );
        }

        let mut out = String::from("Available pipelines:\n\n");
        for (name, description) in self.store.list() {
            out.push_str(&format!(
                "- **{}**: {}\n",
                name,
                description.unwrap_or("No description")
            ));
        }
        out.push_str(&format!("\nTo run a pipeline, use: `{}`", RUN_USAGE));
        out
    }

    /// Fixed usage text
    pub fn help_text(&self) -> String {
        format!(
            "Pipeline Executor Commands:\n\n\
             - `list pipelines`: List all available pipelines\n\
             - `{}`: Run a specific pipeline\n\n\
             To add new pipelines, export them from LLM Pipeline Builder and place the JSON files in the {} directory.",
            RUN_USAGE, self.pipelines_dir
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::{LlmBackend, NodeDispatcher};
    use crate::host::ChatMessage;
    use crate::pipeline::{ExecutionContext, Node, PipelineDefinition};
    use async_trait::async_trait;

    const DEMO: &str = r#"{
        "name": "demo",
        "description": "Says hi",
        "nodes": [
            {"id": "1", "type": "input"},
            {"id": "2", "type": "prompt", "params": {"template": "Hi {{query}}"}}
        ],
        "edges": [{"source": "1", "target": "2"}]
    }"#;

    fn handler_with(defs: &[&str]) -> CommandHandler {
        let mut store = PipelineStore::new();
        for json in defs {
            store.insert(PipelineDefinition::from_json(json).unwrap()).unwrap();
        }
        CommandHandler::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_end_to_end_run() {
        let handler = handler_with(&[DEMO]);
        assert_eq!(
            handler.handle("run pipeline: demo with input: Bob").await,
            "Hi Bob"
        );
    }

    #[tokio::test]
    async fn test_unknown_pipeline_names_it() {
        let handler = handler_with(&[DEMO]);
        let text = handler.handle("run pipeline: ghost with input: x").await;
        assert_eq!(text, "Error: Pipeline 'ghost' not found.");
    }

    #[tokio::test]
    async fn test_no_input_nodes() {
        let handler = handler_with(&[r#"{"name": "bare", "nodes": [{"id": "o", "type": "output"}]}"#]);
        assert_eq!(
            handler.handle("run pipeline: bare").await,
            "Error: No input nodes found in the pipeline."
        );
    }

    #[tokio::test]
    async fn test_help() {
        let handler = handler_with(&[]);
        insta::assert_snapshot!(handler.handle("hello there").await, @r"
        Pipeline Executor Commands:

        - `list pipelines`: List all available pipelines
        - `run pipeline: <pipeline_name> with input: <your input>`: Run a specific pipeline

        To add new pipelines, export them from LLM Pipeline Builder and place the JSON files in the pipeline_configs directory.
        ");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let handler = handler_with(&[]).with_pipelines_dir("flows");
        assert_eq!(
            handler.handle("list pipelines").await,
            "No pipelines available. Upload JSON pipeline configurations to the flows directory."
        );
    }

    #[tokio::test]
    async fn test_list() {
        let handler = handler_with(&[DEMO, r#"{"name": "bare"}"#]);
        insta::assert_snapshot!(handler.handle("please list pipelines now").await, @r"
        Available pipelines:

        - **bare**: No description
        - **demo**: Says hi

        To run a pipeline, use: `run pipeline: <pipeline_name> with input: <your input>`
        ");
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmBackend for FailingLlm {
        fn name(&self) -> &str {
            "failing"
        }

        async fn respond(
            &self,
            _node: &Node,
            _input: &str,
            _context: &mut ExecutionContext,
        ) -> Result<String, LlmflowError> {
            Err(LlmflowError::LlmBackend {
                message: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_execution_fault_becomes_text() {
        let json = r#"{
            "name": "ask",
            "nodes": [{"id": "in", "type": "input"}, {"id": "m", "type": "llm"}],
            "edges": [{"source": "in", "target": "m"}]
        }"#;
        let executor = PipelineExecutor::with_dispatcher(
            NodeDispatcher::new().with_llm(Arc::new(FailingLlm)),
        );
        let handler = handler_with(&[json]).with_executor(executor);

        let text = handler.handle("run pipeline: ask with input: q").await;
        assert!(text.starts_with("Error executing pipeline: "));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_chat_completion_round_trip() {
        let handler = handler_with(&[DEMO]);
        let request = ChatCompletionRequest {
            model: None,
            messages: vec![ChatMessage::user("run pipeline: demo with input: Ada")],
        };

        let response = handler.process_chat_completion(&request).await;
        assert_eq!(response.content(), Some("Hi Ada"));
        assert_eq!(response.choices.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_completion_without_user_message() {
        let handler = handler_with(&[DEMO]);
        let request = ChatCompletionRequest {
            model: None,
            messages: vec![],
        };

        let response = handler.process_chat_completion(&request).await;
        assert_eq!(response.content(), Some("No user message found in the request."));
    }

    #[tokio::test]
    async fn test_chat_completion_with_empty_user_message() {
        let handler = handler_with(&[DEMO]);
        let request = ChatCompletionRequest {
            model: None,
            messages: vec![ChatMessage::user(""), ChatMessage::user("list pipelines")],
        };

        let response = handler.process_chat_completion(&request).await;
        assert_eq!(response.content(), Some("No user message found in the request."));
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let handler = handler_with(&[DEMO]);
        let (a, b) = tokio::join!(
            handler.handle("run pipeline: demo with input: one"),
            handler.handle("run pipeline: demo with input: two"),
        );
        assert_eq!(a, "Hi one");
        assert_eq!(b, "Hi two");
    }
}
