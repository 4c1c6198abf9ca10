//! # Descriptor Decode
//!
//! Stateless JSON decode of metadata descriptor bytes. Only the
//! semantic content matters here; transport-level encoding concerns
//! (compression, envelopes) stay with orchestration.

use crate::errors::MetadataError;
use crate::model::ConsentMetadata;

/// Decode a metadata descriptor from its JSON bytes.
///
/// Malformed JSON, unknown domain tags, and bad hash encodings all
/// surface as [`MetadataError::Decode`]; nothing panics.
pub fn decode(bytes: &[u8]) -> Result<ConsentMetadata, MetadataError> {
    serde_json::from_slice(bytes).map_err(|err| MetadataError::Decode(err.to_string()))
}

/// Decode a descriptor and run the full validation over it. This is the
/// form the transition verifier applies to every bundle attachment.
pub fn decode_validated(bytes: &[u8]) -> Result<ConsentMetadata, MetadataError> {
    let metadata = decode(bytes)?;
    metadata.validate()?;
    Ok(metadata)
}
