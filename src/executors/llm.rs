// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! LLM capability
//!
//! `llm` nodes, and `prompt`/`summarizer` nodes carrying an `llm` block, go
//! through an [`LlmBackend`]. The bundled [`PlaceholderLlm`] never leaves the
//! process; deployments that talk to a real model plug in their own backend
//! and own its timeouts.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LlmflowError;
use crate::pipeline::{ExecutionContext, Node};

/// Something that can answer on behalf of a language model
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Produce the output of an `llm` node for `input`
    async fn respond(
        &self,
        node: &Node,
        input: &str,
        context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError>;

    /// Complete a rendered prompt for a node with an `llm` block
    ///
    /// The default hands the rendered prompt straight back.
    async fn complete_prompt(
        &self,
        _node: &Node,
        prompt: String,
        _llm_config: &Value,
        _context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError> {
        Ok(prompt)
    }
}

/// Deterministic stand-in for a model
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderLlm;

impl PlaceholderLlm {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmBackend for PlaceholderLlm {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn respond(
        &self,
        _node: &Node,
        input: &str,
        _context: &mut ExecutionContext,
    ) -> Result<String, LlmflowError> {
        Ok(format!("LLM response to: {}", input))
    }
}
