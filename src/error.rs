//! Error types for ipnotes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Invalid IPv4 address: {0}")]
    InvalidIp(String),

    #[error("Annotation must contain at least one token")]
    EmptyAnnotation,

    #[error("Corrupt data file {path:?}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    #[error("File system error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
