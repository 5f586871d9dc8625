// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Retrieval capability for `rag` nodes

use async_trait::async_trait;

use crate::errors::LlmflowError;
use crate::pipeline::{ExecutionContext, Node};

/// Enhances the running value with retrieved knowledge
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Produce the output of a `rag` node for `input`
    async fn enhance(
        &self,
        node: &Node,
        input: &str,
        context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError>;
}

/// Deterministic stand-in for a knowledge base
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRetriever;

impl PlaceholderRetriever {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Retriever for PlaceholderRetriever {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn enhance(
        &self,
        _node: &Node,
        input: &str,
        _context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError> {
        Ok(format!("RAG enhanced: {}", input))
    }
}
