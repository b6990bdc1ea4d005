//! Configuration management for ipnotes.
//!
//! Settings come from an optional YAML file; every field has a default, so
//! an empty or partial file is valid. This module also decides which data
//! file a run uses.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::NotesError;

/// Data file looked up in the working directory.
pub const DATA_FILE_NAME: &str = "ipnotes.json";

/// Per-user directory under the home directory.
pub const APP_DIR_NAME: &str = ".ipnotes";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Data file to use when `--data-file` is not given
    pub data_file: Option<PathBuf>,

    /// Maximum display width of the tag column in the summary report
    pub summary_tag_width: usize,

    /// Only show the most frequent N tags in the summary report
    pub summary_top: Option<usize>,

    /// Warn about ingestion lines that do not start with an IPv4 address
    pub warn_invalid_lines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            summary_tag_width: 24,
            summary_top: None,
            warn_invalid_lines: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, else the per-user one if present,
    /// else defaults. An explicit path that does not exist is an error.
    pub fn load_or_default(explicit: Option<&Path>, home: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = home.map(|h| h.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)) {
            if path.exists() {
                debug!("Using config file {:?}", path);
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.summary_tag_width < 4 {
            return Err(NotesError::Config(format!(
                "summary_tag_width must be at least 4, got {}",
                self.summary_tag_width
            ))
            .into());
        }
        if self.summary_top == Some(0) {
            return Err(NotesError::Config("summary_top must be greater than 0".to_string()).into());
        }
        Ok(())
    }
}

/// Pick the data file for this run.
///
/// Precedence: explicit path, configured path, `ipnotes.json` in `cwd` if it
/// exists, then `~/.ipnotes/ipnotes.json` (the directory is created when
/// missing). Without a home directory the working-directory file is used.
pub fn resolve_data_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit.or(configured) {
        return Ok(path.to_path_buf());
    }

    let local = cwd.join(DATA_FILE_NAME);
    if local.exists() {
        return Ok(local);
    }

    match home {
        Some(home) => {
            let dir = home.join(APP_DIR_NAME);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory: {:?}", dir))?;
            Ok(dir.join(DATA_FILE_NAME))
        }
        None => Ok(local),
    }
}

/// Cross-platform home directory resolution.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
