// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Pipeline definition structures
//!
//! Defines the schema of the JSON files exported by the pipeline builder.
//! Fields the executor does not use (node positions, edge handles, labels)
//! are accepted and ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use crate::errors::LlmflowError;

/// Pipeline definition loaded from a `.json` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// Pipeline name; the loader falls back to the file stem when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Pipeline description
    #[serde(default)]
    pub description: Option<String>,

    /// Nodes, in definition order
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// Edges, in definition order
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl PipelineDefinition {
    /// Load a definition from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, LlmflowError> {
        let content = std::fs::read_to_string(path).map_err(|e| LlmflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|e| LlmflowError::DefinitionLoad {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse a definition from a JSON string
    pub fn from_json(json: &str) -> Result<Self, LlmflowError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serialize the definition to pretty JSON
    pub fn to_json(&self) -> Result<String, LlmflowError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Declared name, or an empty string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Get the first node carrying `id`
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The node a run starts from: the first `input` node in definition order
    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Input)
    }

    /// All input nodes
    pub fn input_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Input)
            .collect()
    }
}

/// A typed unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node id, unique within a pipeline
    pub id: String,

    /// Node type; a missing or null type is an unrecognised one
    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    /// Type-specific parameters
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Node {
    /// Create a node with no parameters
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            params: Map::new(),
        }
    }

    /// Builder-style parameter setter
    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// A string parameter, or `""` when missing or not a string
    pub fn str_param(&self, key: &str) -> &str {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Whether a parameter is present at all
    pub fn has_param(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }
}

/// Node type tag
///
/// The known kinds form a closed set; anything else lands in [`NodeKind::Other`]
/// and is passed through unchanged by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Prompt,
    Llm,
    Rag,
    Summarizer,
    Output,
    /// Unrecognised type, kept verbatim
    Other(String),
}

impl NodeKind {
    /// The tag as written in definition files
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Prompt => "prompt",
            Self::Llm => "llm",
            Self::Rag => "rag",
            Self::Summarizer => "summarizer",
            Self::Output => "output",
            Self::Other(tag) => tag,
        }
    }

    /// Whether the dispatcher has a dedicated handler for this kind
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "input" => Self::Input,
            "prompt" => Self::Prompt,
            "llm" => Self::Llm,
            "rag" => Self::Rag,
            "summarizer" => Self::Summarizer,
            "output" => Self::Output,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(Self::from).unwrap_or_default())
    }
}

/// A directed connection between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Run-scoped state shared by every handler of a single run
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    values: Map<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
