// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Chat-completion request and response shapes exchanged with the host

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier reported as both response id and model name
pub const EXECUTOR_ID: &str = "pipeline-executor";

/// Role of a chat message participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
    /// Any role this executor does not act on (`developer`, `function`, ...)
    #[serde(other)]
    Other,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default, deserialize_with = "content_text")]
    pub content: String,
}

/// Message content as plain text
///
/// `null` reads as empty; a list of content parts reads as its text parts
/// joined together. Other shapes read as empty.
fn content_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect(),
        _ => String::new(),
    })
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request handed over by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Content of the first user message, if any
    pub fn first_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
}

/// One generated message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: FinishReason,
}

/// Response returned to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Wrap `content` as the single assistant message of a finished completion
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            id: EXECUTOR_ID.to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: EXECUTOR_ID.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(content),
                finish_reason: FinishReason::Stop,
            }],
        }
    }

    /// Text of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_user_message_skips_system() {
        let request: ChatCompletionRequest = serde_json::from_value(json!({
            "model": "pipeline-executor",
            "messages": [
                {"role": "system", "content": "be nice"},
                {"role": "user", "content": "list pipelines"},
                {"role": "user", "content": "ignored"}
            ]
        }))
        .unwrap();

        assert_eq!(request.first_user_message(), Some("list pipelines"));
    }

    #[test]
    fn test_unrecognised_roles_and_null_content_are_tolerated() {
        let request: ChatCompletionRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "developer", "content": "house rules"},
                {"role": "assistant", "content": null, "tool_calls": []},
                {"role": "tool", "content": null},
                {"role": "user", "content": "list pipelines"}
            ]
        }))
        .unwrap();

        assert_eq!(request.messages[0].role, ChatRole::Other);
        assert_eq!(request.messages[1].content, "");
        assert_eq!(request.first_user_message(), Some("list pipelines"));
    }

    #[test]
    fn test_content_parts_are_joined() {
        let request: ChatCompletionRequest = serde_json::from_value(json!({
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "run pipeline: demo "},
                    {"type": "image_url", "image_url": {"url": "data:,"}},
                    {"type": "text", "text": "with input: Bob"}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(
            request.first_user_message(),
            Some("run pipeline: demo with input: Bob")
        );
    }

    #[test]
    fn test_no_user_message() {
        let request = ChatCompletionRequest {
            model: None,
            messages: vec![ChatMessage::assistant("hi")],
        };
        assert!(request.first_user_message().is_none());
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(ChatCompletionResponse::from_text("done")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "pipeline-executor",
                "object": "chat.completion",
                "created": 0,
                "model": "pipeline-executor",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "done"},
                    "finish_reason": "stop"
                }]
            })
        );
    }
}
