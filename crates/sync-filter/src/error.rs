//! Error types for sync-filter

/// Result type for sync-filter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-filter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown state filter: '{name}'")]
    UnknownFilter { name: String },

    #[error("Unknown direction '{name}' (expected incoming, outgoing or conflicting)")]
    UnknownDirection { name: String },
}
