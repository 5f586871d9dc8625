// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Graph view over a pipeline definition
//!
//! Keeps an adjacency map from node id to its outgoing targets in definition
//! order (what the walker follows) and a petgraph mirror of the full edge set
//! (what validation and rendering look at).

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::pipeline::{Node, PipelineDefinition};

/// Graph over the nodes and edges of one pipeline
pub struct PipelineGraph<'a> {
    definition: &'a PipelineDefinition,
    graph: DiGraph<usize, ()>,
    id_to_index: HashMap<&'a str, NodeIndex>,
    successors: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> PipelineGraph<'a> {
    /// Build the graph for a definition
    ///
    /// Duplicate ids resolve to their first node. Dangling edges stay in the
    /// adjacency map but have no petgraph counterpart.
    pub fn build(definition: &'a PipelineDefinition) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_index = HashMap::new();

        for (idx, node) in definition.nodes.iter().enumerate() {
            if !id_to_index.contains_key(node.id.as_str()) {
                let index = graph.add_node(idx);
                id_to_index.insert(node.id.as_str(), index);
            }
        }

        let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &definition.edges {
            successors
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());

            if let (Some(&from), Some(&to)) = (
                id_to_index.get(edge.source.as_str()),
                id_to_index.get(edge.target.as_str()),
            ) {
                graph.add_edge(from, to, ());
            }
        }

        Self {
            definition,
            graph,
            id_to_index,
            successors,
        }
    }

    /// Look a node up by id
    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.id_to_index
            .get(id)
            .map(|&index| &self.definition.nodes[self.graph[index]])
    }

    /// Outgoing targets of a node, in definition order (may include dangling ids)
    pub fn successors(&self, id: &str) -> &[&'a str] {
        self.successors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The node the walker moves to after `id`
    ///
    /// Only the first outgoing edge is considered. A first edge whose target
    /// does not resolve ends the walk.
    pub fn next_node(&self, id: &str) -> Option<&'a Node> {
        self.successors(id)
            .first()
            .and_then(|target| self.node(target))
    }

    /// Ids of nodes with more than one outgoing edge
    pub fn branching_nodes(&self) -> Vec<&'a str> {
        self.definition
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| self.successors(id).len() > 1)
            .collect()
    }

    /// Edges whose source or target does not name a node
    pub fn dangling_edges(&self) -> Vec<(&'a str, &'a str)> {
        self.definition
            .edges
            .iter()
            .filter(|e| {
                !self.id_to_index.contains_key(e.source.as_str())
                    || !self.id_to_index.contains_key(e.target.as_str())
            })
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    /// Whether the full edge set contains a cycle
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Ids the walker would visit from the start node, without running anything
    pub fn walk_path(&self) -> Vec<&'a str> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.definition.start_node();

        while let Some(node) = current {
            if !visited.insert(node.id.as_str()) {
                break;
            }
            path.push(node.id.as_str());
            current = self.next_node(&node.id);
        }

        path
    }

    /// Generate Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for node in self.unique_nodes() {
            out.push_str(&format!(
                "    {}[\"{} ({})\"]\n",
                mermaid_id(&node.id),
                mermaid_label(&node.id),
                mermaid_label(node.kind.as_str())
            ));
        }

        for edge in &self.definition.edges {
            out.push_str(&format!(
                "    {} --> {}\n",
                mermaid_id(&edge.source),
                mermaid_id(&edge.target)
            ));
        }

        out
    }

    /// Generate DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for node in self.unique_nodes() {
            let id = dot_escape(&node.id);
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\\n{}\"];\n",
                id,
                id,
                dot_escape(node.kind.as_str())
            ));
        }

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                let from = &self.definition.nodes[self.graph[from]];
                let to = &self.definition.nodes[self.graph[to]];
                out.push_str(&format!(
                    "    \"{}\" -> \"{}\";\n",
                    dot_escape(&from.id),
                    dot_escape(&to.id)
                ));
            }
        }

        out.push_str("}\n");
        out
    }

    /// Generate text representation of the walk order
    pub fn to_text(&self) -> String {
        let path = self.walk_path();
        if path.is_empty() {
            return "No input node: nothing would run.\n".to_string();
        }

        let mut out = String::new();
        for (i, id) in path.iter().enumerate() {
            let kind = self.node(id).map(|n| n.kind.to_string()).unwrap_or_default();
            out.push_str(&format!("{}. {} ({})", i + 1, id, kind));

            let skipped = self.successors(id).len().saturating_sub(1);
            if skipped > 0 {
                out.push_str(&format!(" [{} more edge(s) not followed]", skipped));
            }

            out.push('\n');
        }

        out
    }

    fn unique_nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.graph
            .node_indices()
            .map(move |index| &self.definition.nodes[self.graph[index]])
    }
}

/// Mermaid node ids must be plain identifiers
///
/// Every character outside `[A-Za-z0-9]` becomes `_<hex>_`, so distinct ids
/// never collapse onto the same identifier.
fn mermaid_id(id: &str) -> String {
    let mut out = String::from("n_");
    for c in id.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push_str(&format!("_{:x}_", c as u32));
        }
    }
    out
}

fn mermaid_label(text: &str) -> String {
    text.replace('"', "#quot;")
}

/// Quote-safe text for a double-quoted DOT string
fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
