//! JSON serialization of repository references

use crate::{Error, ReferenceCodec, Result};
use sync_model::RepositoryRef;

/// Serializes [`RepositoryRef`] values as compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct RepositoryRefCodec;

impl ReferenceCodec for RepositoryRefCodec {
    type Reference = RepositoryRef;

    fn serialize(&self, reference: &RepositoryRef) -> Result<Vec<u8>> {
        serde_json::to_vec(reference).map_err(|e| Error::Serialize { message: e.to_string() })
    }

    fn deserialize(&self, bytes: &[u8]) -> Option<RepositoryRef> {
        serde_json::from_slice(bytes).ok()
    }
}
