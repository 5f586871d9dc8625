// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Pipeline store
//!
//! Holds every loaded pipeline keyed by name. Loaded once at startup and read
//! concurrently afterwards without locking.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::LlmflowError;
use crate::pipeline::PipelineDefinition;

/// Loaded pipelines, keyed by name
#[derive(Debug, Clone, Default)]
pub struct PipelineStore {
    pipelines: BTreeMap<String, StoredPipeline>,
}

#[derive(Debug, Clone)]
struct StoredPipeline {
    definition: PipelineDefinition,
    source: Option<PathBuf>,
}

/// Outcome of loading a directory
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names loaded successfully
    pub loaded: Vec<String>,
    /// Files that failed to load, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Names defined by more than one file
    pub overwritten: Vec<String>,
}

impl PipelineStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`
    ///
    /// Files are read in name order. A file that cannot be read or parsed is
    /// logged and skipped; it never stops the rest from loading.
    pub fn load_dir(dir: &Path) -> Result<(Self, LoadReport), LlmflowError> {
        let mut store = Self::new();
        let mut report = LoadReport::default();

        let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy()))
            .join("*.json")
            .to_string_lossy()
            .to_string();
        let mut files: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        for path in files {
            match PipelineDefinition::from_file(&path) {
                Ok(definition) => {
                    let name = store.insert_from(definition, Some(path.clone()), &mut report);
                    tracing::info!("Loaded pipeline: {}", name);
                    report.loaded.push(name);
                }
                Err(e) => {
                    tracing::error!("Error loading pipeline from {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        Ok((store, report))
    }

    /// Insert a definition, returning the key it was stored under
    ///
    /// Definitions without a name cannot be keyed here and are rejected.
    pub fn insert(&mut self, definition: PipelineDefinition) -> Result<String, LlmflowError> {
        if definition.name.is_none() {
            return Err(LlmflowError::InvalidDefinition {
                reason: "pipeline has no name".into(),
                help: Some("Set the top-level \"name\" field".into()),
            });
        }

        let mut report = LoadReport::default();
        Ok(self.insert_from(definition, None, &mut report))
    }

    fn insert_from(
        &mut self,
        mut definition: PipelineDefinition,
        source: Option<PathBuf>,
        report: &mut LoadReport,
    ) -> String {
        let name = definition
            .name
            .clone()
            .or_else(|| source.as_deref().and_then(file_stem))
            .unwrap_or_default();
        definition.name = Some(name.clone());

        let stored = StoredPipeline { definition, source };
        if let Some(previous) = self.pipelines.insert(name.clone(), stored) {
            tracing::warn!(
                "Pipeline '{}' from {} replaces the one from {}",
                name,
                describe_source(self.pipelines[&name].source.as_deref()),
                describe_source(previous.source.as_deref()),
            );
            report.overwritten.push(name.clone());
        }

        name
    }

    /// Get a pipeline by name
    pub fn get(&self, name: &str) -> Option<&PipelineDefinition> {
        self.pipelines.get(name).map(|p| &p.definition)
    }

    /// File a pipeline was loaded from, if any
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.pipelines.get(name).and_then(|p| p.source.as_deref())
    }

    /// Names and descriptions, in name order
    pub fn list(&self) -> Vec<(&str, Option<&str>)> {
        self.pipelines
            .iter()
            .map(|(name, p)| (name.as_str(), p.definition.description.as_deref()))
            .collect()
    }

    /// Iterate over all pipelines in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PipelineDefinition)> {
        self.pipelines
            .iter()
            .map(|(name, p)| (name.as_str(), &p.definition))
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

fn describe_source(source: Option<&Path>) -> String {
    source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}
