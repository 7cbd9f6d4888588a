//! The transfer codec

use crate::{Error, Result};
use tracing::{debug, warn};

/// Platform data type name the format is registered under.
pub const TRANSFER_TYPE_NAME: &str = "svn-repository-resource-transfer";

const TAG_COPY: u8 = 0;
const TAG_CUT: u8 = 1;
const TAG_NONE: u8 = 0xFF;

/// What the receiver should do with the transferred references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferOperation {
    #[default]
    Copy,
    Cut,
    /// Nothing to transfer; trailing bytes are ignored
    None,
}

impl TransferOperation {
    pub fn tag(self) -> u8 {
        match self {
            TransferOperation::Copy => TAG_COPY,
            TransferOperation::Cut => TAG_CUT,
            TransferOperation::None => TAG_NONE,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_COPY => Some(TransferOperation::Copy),
            TAG_CUT => Some(TransferOperation::Cut),
            TAG_NONE => Some(TransferOperation::None),
            _ => None,
        }
    }
}

/// Serializer for the opaque references carried in each chunk.
pub trait ReferenceCodec {
    type Reference;

    fn serialize(&self, reference: &Self::Reference) -> Result<Vec<u8>>;

    /// `None` for a payload that is malformed or not recognized.
    fn deserialize(&self, bytes: &[u8]) -> Option<Self::Reference>;
}

/// A decoded transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload<R> {
    pub operation: TransferOperation,
    pub resources: Vec<R>,
}

/// Encodes and decodes the transfer format with a given reference codec.
#[derive(Debug, Default, Clone)]
pub struct ResourceTransfer<C> {
    codec: C,
}

impl<C: ReferenceCodec> ResourceTransfer<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn encode(&self, operation: TransferOperation, resources: &[C::Reference]) -> Result<Vec<u8>> {
        let mut out = vec![operation.tag()];
        if operation == TransferOperation::None {
            return Ok(out);
        }

        for reference in resources {
            let payload = self.codec.serialize(reference)?;
            let len = u16::try_from(payload.len()).map_err(|_| Error::PayloadTooLarge { len: payload.len() })?;
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&payload);
        }
        Ok(out)
    }

    /// Decode a buffer. `None` means "no data": the none operation or an
    /// unknown operation tag.
    pub fn decode(&self, bytes: &[u8]) -> Option<TransferPayload<C::Reference>> {
        let Some((&tag, mut rest)) = bytes.split_first() else {
            return Some(TransferPayload {
                operation: TransferOperation::Copy,
                resources: Vec::new(),
            });
        };

        let operation = match TransferOperation::from_tag(tag) {
            Some(TransferOperation::None) => return None,
            Some(operation) => operation,
            None => {
                warn!(tag, "Unknown transfer operation tag");
                return None;
            }
        };

        let mut resources = Vec::new();
        let mut dropped = 0usize;
        while !rest.is_empty() {
            let [lo, hi, tail @ ..] = rest else {
                warn!(remaining = rest.len(), "Transfer ends inside a chunk length");
                dropped += 1;
                break;
            };
            let len = usize::from(u16::from_le_bytes([*lo, *hi]));
            if tail.len() < len {
                warn!(expected = len, available = tail.len(), "Truncated transfer chunk dropped");
                dropped += 1;
                break;
            }

            let (payload, next) = tail.split_at(len);
            match self.codec.deserialize(payload) {
                Some(reference) => resources.push(reference),
                None => {
                    debug!(len, "Unrecognized transfer chunk dropped");
                    dropped += 1;
                }
            }
            rest = next;
        }

        debug!(operation = ?operation, decoded = resources.len(), dropped, "Decoded transfer");
        Some(TransferPayload { operation, resources })
    }
}
