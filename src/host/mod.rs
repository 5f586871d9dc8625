// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Host integration
//!
//! The host runtime sends a chat-completion request; llmflow answers with a
//! single assistant message produced by [`CommandHandler`].

mod handler;
mod types;

pub use handler::{CommandHandler, RUN_USAGE};
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole,
    FinishReason, EXECUTOR_ID,
};
