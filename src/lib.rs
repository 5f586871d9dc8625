// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! # llmflow - LLM Pipeline Executor
//!
//! `llmflow` loads pipeline definitions exported by the LLM pipeline builder
//! (JSON graphs of typed nodes) and runs them against a text input, driven by
//! plain chat commands.
//!
//! ## Features
//!
//! - **Chat commands** - `list pipelines` and `run pipeline: <name> with input: <text>`
//! - **Single-path walk** - follows the first edge out of each node, cycle safe
//! - **Pluggable backends** - `llm` and `rag` nodes call injectable capabilities
//! - **Host adapter** - answers chat-completion requests with one assistant message
//!
//! ## Quick Start
//!
//! ```bash
//! # Show loaded pipelines
//! llmflow list
//!
//! # Run one
//! llmflow run demo --input "Bob"
//!
//! # Same thing, phrased as a chat message
//! llmflow ask "run pipeline: demo with input: Bob"
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod executors;
pub mod host;
pub mod pipeline;

// Re-export commonly used types
pub use command::{interpret, Intent};
pub use config::Settings;
pub use errors::{LlmflowError, LlmflowResult};
pub use executors::{LlmBackend, NodeDispatcher, Retriever};
pub use host::{ChatCompletionRequest, ChatCompletionResponse, CommandHandler};
pub use pipeline::{Node, NodeKind, PipelineDefinition, PipelineExecutor, PipelineStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
