// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Error types
//!
//! Library code returns [`LlmflowResult`]. None of these errors cross the
//! host boundary: the command facade renders every failure as plain text.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for llmflow operations
pub type LlmflowResult<T> = Result<T, LlmflowError>;

/// Main error type for llmflow
#[derive(Error, Debug, Diagnostic)]
pub enum LlmflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline '{name}' not found")]
    #[diagnostic(
        code(llmflow::pipeline_not_found),
        help("Run 'llmflow list' to see the loaded pipelines")
    )]
    PipelineNotFound { name: String },

    #[error("No input nodes found in pipeline '{pipeline}'")]
    #[diagnostic(
        code(llmflow::no_input_node),
        help("Add a node with \"type\": \"input\" to start the pipeline")
    )]
    NoInputNode { pipeline: String },

    #[error("Invalid pipeline definition: {reason}")]
    #[diagnostic(code(llmflow::invalid_definition))]
    InvalidDefinition {
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to load pipeline definition '{path}': {error}")]
    #[diagnostic(
        code(llmflow::definition_load_failed),
        help("Pipeline files must contain a single JSON object with 'nodes' and 'edges'")
    )]
    DefinitionLoad { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Node '{node}' failed: {message}")]
    #[diagnostic(code(llmflow::node_failed))]
    NodeFailed { node: String, message: String },

    #[error("LLM backend error: {message}")]
    #[diagnostic(code(llmflow::llm_backend))]
    LlmBackend { message: String },

    #[error("Retrieval backend error: {message}")]
    #[diagnostic(code(llmflow::retrieval_backend))]
    RetrievalBackend { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid configuration in '{path}': {message}")]
    #[diagnostic(code(llmflow::config_error))]
    Config { path: PathBuf, message: String },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(llmflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(llmflow::glob_error))]
    GlobPattern { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(llmflow::io_error))]
    Io { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(llmflow::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(llmflow::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for LlmflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_json::Error> for LlmflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for LlmflowError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl From<glob::PatternError> for LlmflowError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl LlmflowError {
    /// Wrap an error raised while a node was running
    pub fn node_failed(node: &str, source: impl std::fmt::Display) -> Self {
        Self::NodeFailed {
            node: node.to_string(),
            message: source.to_string(),
        }
    }
}
