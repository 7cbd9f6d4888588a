//! Clipboard transfer of repository resource references
//!
//! Wire format, single pass over an in-memory buffer:
//!
//! ```text
//! operation: u8            0 = copy, 1 = cut, 0xFF = none
//! repeated (unless none):
//!     length: u16 LE
//!     payload: [u8; length]   one serialized reference
//! ```
//!
//! Decoding is forgiving: an empty buffer is a copy of nothing, a chunk whose
//! payload is cut short or that the reference codec rejects is dropped, and
//! whatever well-formed chunks precede it are kept.

pub mod codec;
pub mod error;
pub mod reference;

pub use codec::{ReferenceCodec, ResourceTransfer, TRANSFER_TYPE_NAME, TransferOperation, TransferPayload};
pub use error::{Error, Result};
pub use reference::RepositoryRefCodec;
