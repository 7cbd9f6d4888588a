//! Error types for sync-model

/// Result type for sync-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or parsing model values
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid resource path: '{path}'")]
    InvalidPath { path: String },

    #[error("Unknown local state: '{name}'")]
    UnknownState { name: String },

    #[error("Unknown sync direction: '{name}'")]
    UnknownDirection { name: String },

    #[error("Unknown change kind: '{name}'")]
    UnknownChangeKind { name: String },

    #[error("Unknown resource kind: '{name}'")]
    UnknownResourceKind { name: String },
}
