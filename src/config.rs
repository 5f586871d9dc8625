// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Runtime settings
//!
//! Resolution order: built-in defaults, then the first config file found
//! (explicit path, `llmflow.toml` in the working directory, the platform
//! config directory), then the `PIPELINES_DIR` environment variable, then
//! command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::LlmflowError;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "llmflow.toml";

/// Environment variable overriding the pipelines directory
pub const PIPELINES_DIR_ENV: &str = "PIPELINES_DIR";

/// llmflow settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory scanned for `*.json` pipeline definitions
    #[serde(default = "default_pipelines_dir")]
    pub pipelines_dir: PathBuf,

    /// Create the pipelines directory when it is missing
    #[serde(default = "default_true")]
    pub create_missing_dir: bool,
}

fn default_pipelines_dir() -> PathBuf {
    PathBuf::from("./pipeline_configs")
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pipelines_dir: default_pipelines_dir(),
            create_missing_dir: true,
        }
    }
}

impl Settings {
    /// Resolve settings from files and environment
    ///
    /// An explicit `config` path must exist; implicit locations are optional.
    pub fn load(config: Option<&Path>) -> Result<Self, LlmflowError> {
        let mut settings = match config {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(dir) = std::env::var(PIPELINES_DIR_ENV) {
            if !dir.is_empty() {
                settings.pipelines_dir = PathBuf::from(dir);
            }
        }

        Ok(settings)
    }

    /// Parse settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LlmflowError> {
        let content = std::fs::read_to_string(path).map_err(|e| LlmflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| LlmflowError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, LlmflowError> {
        toml::from_str(content).map_err(Into::into)
    }

    /// Apply a command-line override of the pipelines directory
    pub fn with_pipelines_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.pipelines_dir = dir;
        }
        self
    }

    /// Make sure the pipelines directory exists, creating it if allowed
    pub fn prepare_pipelines_dir(&self) -> Result<(), LlmflowError> {
        if self.pipelines_dir.exists() || !self.create_missing_dir {
            return Ok(());
        }

        tracing::info!("Creating pipelines directory {}", self.pipelines_dir.display());
        std::fs::create_dir_all(&self.pipelines_dir)?;
        Ok(())
    }

    /// Last path component of the pipelines directory, for user-facing text
    pub fn pipelines_dir_label(&self) -> String {
        self.pipelines_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.pipelines_dir.display().to_string())
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        directories::ProjectDirs::from("org", "rhodium-standard", "llmflow")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.is_file())
    }
}
