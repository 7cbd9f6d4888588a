//! Error types for sync-transfer

/// Result type for sync-transfer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding. Decoding never fails; bad input degrades to
/// dropped entries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialized reference is {len} bytes; at most {max} fit a chunk", max = u16::MAX)]
    PayloadTooLarge { len: usize },

    #[error("Failed to serialize reference: {message}")]
    Serialize { message: String },
}
