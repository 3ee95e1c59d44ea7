use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_concurrent_evaluations must be at least 1")]
    ZeroConcurrency,
    #[error("regex_size_limit must be at least 1")]
    ZeroRegexLimit,
}

/// How a Folder filter with `include_subfolders` compares paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderMatch {
    /// Raw string prefix: `Notes` also matches `NotesArchive/a.md`.
    #[default]
    Prefix,
    /// The prefix must end at a path separator.
    Segment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Upper bound on documents evaluated at once during a corpus scan.
    ///
    /// This caps documents, not content reads. With `short_circuit` off a
    /// document reads once per text filter it holds, so reads in flight can
    /// reach this limit times the query's text filter count.
    pub max_concurrent_evaluations: usize,
    /// Stop evaluating a group once its outcome is decided.
    pub short_circuit: bool,
    pub folder_match: FolderMatch,
    /// Compiled size limit for user patterns, in bytes.
    pub regex_size_limit: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_evaluations: 16,
            short_circuit: true,
            folder_match: FolderMatch::Prefix,
            regex_size_limit: 1 << 20,
        }
    }
}

impl EvaluatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EvaluatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_evaluations == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.regex_size_limit == 0 {
            return Err(ConfigError::ZeroRegexLimit);
        }
        Ok(())
    }
}
