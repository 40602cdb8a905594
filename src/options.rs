//! Conversion options
//!
//! Options come from an optional TOML config file with CLI flags taking
//! precedence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for loading options
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options for one conversion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Directory receiving the `.md` outputs; defaults to the current dir
    pub output_dir: Option<PathBuf>,
    /// Cap on the number of PDF pages converted per document
    pub max_pages: Option<usize>,
}

impl ConvertOptions {
    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Effective output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
