// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Chat command interpreter
//!
//! Commands are recognised by phrase containment, not tokenisation: a
//! trigger phrase anywhere in the message selects the command, whatever
//! surrounds it. Detection ignores case; extracted values keep theirs.

use regex::Regex;
use std::sync::LazyLock;

/// Trigger phrase for running a pipeline
pub const RUN_TRIGGER: &str = "run pipeline:";

/// Separator between pipeline name and input text
pub const INPUT_TRIGGER: &str = "with input:";

/// Trigger phrase for listing pipelines
pub const LIST_TRIGGER: &str = "list pipelines";

static RUN_RE: LazyLock<Regex> = LazyLock::new(|| phrase(RUN_TRIGGER));
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| phrase(INPUT_TRIGGER));
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| phrase(LIST_TRIGGER));

fn phrase(literal: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(literal)))
        .unwrap_or_else(|e| unreachable!("escaped literal is a valid pattern: {e}"))
}

/// What a chat message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the loaded pipelines
    ListPipelines,
    /// Run the named pipeline on `input`
    RunPipeline { name: String, input: String },
    /// Anything else
    Help,
}

/// Classify a chat message
pub fn interpret(message: &str) -> Intent {
    if let Some(run) = RUN_RE.find(message) {
        let rest = &message[run.end()..];

        let (name, input) = match INPUT_RE.find(rest) {
            Some(sep) => (&rest[..sep.start()], &rest[sep.end()..]),
            None => (rest, ""),
        };

        return Intent::RunPipeline {
            name: name.trim().to_string(),
            input: input.trim().to_string(),
        };
    }

    if LIST_RE.is_match(message) {
        return Intent::ListPipelines;
    }

    Intent::Help
}
