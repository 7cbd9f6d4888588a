//! Error types for sync-select

use std::path::PathBuf;

/// Result type for sync-select operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-select operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to look up sync info for {path}: {message}")]
    Lookup { path: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} snapshot at {path}: {message}")]
    SnapshotParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported snapshot format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Selection entry '{entry}' matches no record, ancestor or group")]
    UnknownSelection { entry: String },

    #[error("Unknown command: '{name}'")]
    UnknownCommand { name: String },

    #[error(transparent)]
    Model(#[from] sync_model::Error),

    #[error(transparent)]
    Filter(#[from] sync_filter::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn lookup(path: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::Lookup {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
