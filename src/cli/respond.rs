// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Respond command - answer a host chat-completion request

use miette::{IntoDiagnostic, Result};
use std::io::Read;
use std::path::PathBuf;

use crate::config::Settings;
use crate::errors::LlmflowError;
use crate::host::ChatCompletionRequest;

/// Read a request from `request` (or stdin) and print the JSON response
pub async fn run(settings: &Settings, request: Option<PathBuf>, verbose: bool) -> Result<()> {
    let raw = match &request {
        Some(path) => std::fs::read_to_string(path).map_err(|e| LlmflowError::FileReadError {
            path: path.clone(),
            error: e.to_string(),
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(LlmflowError::from)?;
            buf
        }
    };

    let request: ChatCompletionRequest =
        serde_json::from_str(&raw).map_err(LlmflowError::from)?;

    let handler = super::command_handler(settings, verbose)?;
    let response = handler.process_chat_completion(&request).await;

    println!("{}", serde_json::to_string_pretty(&response).into_diagnostic()?);

    Ok(())
}
