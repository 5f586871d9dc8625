// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Node handlers
//!
//! [`NodeDispatcher`] maps a node's type to the handler that turns the
//! running value into the next one. Model-backed kinds go through the
//! injected [`LlmBackend`] and [`Retriever`] capabilities.

mod llm;
mod rag;
pub mod template;

pub use llm::{LlmBackend, PlaceholderLlm};
pub use rag::{PlaceholderRetriever, Retriever};

use std::sync::Arc;

use crate::errors::LlmflowError;
use crate::pipeline::{ExecutionContext, Node, NodeKind};
use template::{render, QUERY_TOKEN, TEXT_TOKEN};

/// Dispatches nodes to their type-specific handler
#[derive(Clone)]
pub struct NodeDispatcher {
    llm: Arc<dyn LlmBackend>,
    retriever: Arc<dyn Retriever>,
}

impl NodeDispatcher {
    /// Create a dispatcher with the placeholder capabilities
    pub fn new() -> Self {
        Self {
            llm: Arc::new(PlaceholderLlm::new()),
            retriever: Arc::new(PlaceholderRetriever::new()),
        }
    }

    /// Replace the LLM capability
    pub fn with_llm(mut self, llm: Arc<dyn LlmBackend>) -> Self {
        self.llm = llm;
        self
    }

    /// Replace the retrieval capability
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = retriever;
        self
    }

    /// Execute one node against the running value
    pub async fn execute(
        &self,
        node: &Node,
        input: &str,
        context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError> {
        tracing::debug!(node = %node.id, kind = %node.kind, "executing node");

        match &node.kind {
            NodeKind::Input | NodeKind::Output => Ok(input.to_string()),
            NodeKind::Prompt => self.templated(node, QUERY_TOKEN, input, context).await,
            NodeKind::Summarizer => self.templated(node, TEXT_TOKEN, input, context).await,
            NodeKind::Llm => {
                tracing::debug!(node = %node.id, backend = self.llm.name(), "calling llm");
                self.llm
                    .respond(node, input, context)
                    .await
                    .map_err(|e| LlmflowError::node_failed(&node.id, e))
            }
            NodeKind::Rag => {
                tracing::debug!(node = %node.id, backend = self.retriever.name(), "retrieving");
                self.retriever
                    .enhance(node, input, context)
                    .await
                    .map_err(|e| LlmflowError::node_failed(&node.id, e))
            }
            NodeKind::Other(tag) => {
                tracing::warn!(node = %node.id, "Unknown node type: {}", tag);
                Ok(input.to_string())
            }
        }
    }

    /// Render the node's template, then let the LLM finish it if configured
    async fn templated(
        &self,
        node: &Node,
        token: &str,
        input: &str,
        context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError> {
        let prompt = render(node.str_param("template"), token, input);

        match node.params.get("llm") {
            Some(config) => self
                .llm
                .complete_prompt(node, prompt, config, context)
                .await
                .map_err(|e| LlmflowError::node_failed(&node.id, e)),
            None => Ok(prompt),
        }
    }
}

impl Default for NodeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    async fn run(node: &Node, input: &str) -> String {
        let mut ctx = ExecutionContext::new();
        NodeDispatcher::new().execute(node, input, &mut ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_input_and_output_are_identity() {
        assert_eq!(run(&Node::new("i", NodeKind::Input), "abc").await, "abc");
        assert_eq!(run(&Node::new("o", NodeKind::Output), "abc").await, "abc");
    }

    #[tokio::test]
    async fn test_prompt_substitutes_query() {
        let node = Node::new("p", NodeKind::Prompt).with_param("template", "Q: {{query}}");
        assert_eq!(run(&node, "hello").await, "Q: hello");
    }

    #[tokio::test]
    async fn test_prompt_with_llm_block_returns_rendered_prompt() {
        let node = Node::new("p", NodeKind::Prompt)
            .with_param("template", "Explain {{query}}")
            .with_param("llm", json!({"model": "phi:latest", "temperature": 0.7}));
        assert_eq!(run(&node, "rust").await, "Explain rust");
    }

    #[tokio::test]
    async fn test_prompt_without_template_is_empty() {
        assert_eq!(run(&Node::new("p", NodeKind::Prompt), "lost").await, "");
    }

    #[tokio::test]
    async fn test_summarizer_substitutes_text() {
        let node = Node::new("s", NodeKind::Summarizer)
            .with_param("template", "Summarize: {{text}}");
        assert_eq!(run(&node, "long text").await, "Summarize: long text");
    }

    #[tokio::test]
    async fn test_summarizer_ignores_query_token() {
        let node = Node::new("s", NodeKind::Summarizer).with_param("template", "{{query}}");
        assert_eq!(run(&node, "x").await, "{{query}}");
    }

    #[tokio::test]
    async fn test_llm_and_rag_placeholders() {
        assert_eq!(
            run(&Node::new("l", NodeKind::Llm), "hi").await,
            "LLM response to: hi"
        );
        assert_eq!(
            run(&Node::new("r", NodeKind::Rag), "hi").await,
            "RAG enhanced: hi"
        );
    }

    #[tokio::test]
    async fn test_unknown_type_passes_through() {
        let node = Node::new("c", NodeKind::from("custom"));
        assert_eq!(run(&node, "unchanged").await, "unchanged");

        let untyped = Node::new("u", NodeKind::default());
        assert_eq!(run(&untyped, "unchanged").await, "unchanged");
    }

    struct ShoutingLlm;

    #[async_trait]
    impl LlmBackend for ShoutingLlm {
        fn name(&self) -> &str {
            "shouting"
        }

        async fn respond(
            &self,
            _node: &Node,
            input: &str,
            context: &mut ExecutionContext,
        ) -> Result<String, LlmflowError> {
            context.insert("calls", 1);
            Ok(input.to_uppercase())
        }

        async fn complete_prompt(
            &self,
            _node: &Node,
            prompt: String,
            _llm_config: &Value,
            _context: &mut ExecutionContext,
        ) -> Result<String, LlmflowError> {
            Ok(format!("{}!", prompt))
        }
    }

    #[tokio::test]
    async fn test_injected_llm_is_used() {
        let dispatcher = NodeDispatcher::new().with_llm(Arc::new(ShoutingLlm));
        let mut ctx = ExecutionContext::new();

        let out = dispatcher
            .execute(&Node::new("l", NodeKind::Llm), "quiet", &mut ctx)
            .await
            .unwrap();
        assert_eq!(out, "QUIET");
        assert_eq!(ctx.get("calls"), Some(&json!(1)));

        let prompt = Node::new("p", NodeKind::Prompt)
            .with_param("template", "{{query}}")
            .with_param("llm", json!({}));
        let out = dispatcher.execute(&prompt, "go", &mut ctx).await.unwrap();
        assert_eq!(out, "go!");

        let bare = Node::new("p2", NodeKind::Prompt).with_param("template", "{{query}}");
        let out = dispatcher.execute(&bare, "go", &mut ctx).await.unwrap();
        assert_eq!(out, "go");
    }

    struct BrokenRetriever;

    #[async_trait]
    impl Retriever for BrokenRetriever {
        fn name(&self) -> &str {
            "broken"
        }

        async fn enhance(
            &self,
            _node: &Node,
            _input: &str,
            _context: &mut ExecutionContext,
        ) -> Result<String, LlmflowError> {
            Err(LlmflowError::RetrievalBackend {
                message: "index offline".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_backend_failure_names_node() {
        let dispatcher = NodeDispatcher::new().with_retriever(Arc::new(BrokenRetriever));
        let mut ctx = ExecutionContext::new();

        let err = dispatcher
            .execute(&Node::new("kb", NodeKind::Rag), "q", &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmflowError::NodeFailed { ref node, .. } if node == "kb"));
        assert!(err.to_string().contains("index offline"));
    }
}
