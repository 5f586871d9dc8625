// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Pipeline definitions and execution
//!
//! This module defines the data model for builder-exported pipelines, the
//! store they are loaded into, and the single-path walk that runs them.

mod definition;
mod executor;
mod graph;
mod store;
mod validation;
mod walker;

pub use definition::*;
pub use executor::{PipelineExecutor, PipelineResult};
pub use graph::PipelineGraph;
pub use store::{LoadReport, PipelineStore};
pub use validation::{PipelineValidator, ValidationResult};
pub use walker::{GraphWalker, WalkOutcome};
