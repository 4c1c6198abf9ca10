//! # Metadata Errors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons a metadata descriptor is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// The descriptor bytes are not a well-formed descriptor.
    #[error("Metadata descriptor does not decode: {0}")]
    Decode(String),

    /// The domain list is empty.
    #[error("Metadata carries no domains")]
    EmptyDomainList,

    /// The organisation key list is empty.
    #[error("Metadata carries no organisation keys")]
    EmptyKeyList,

    /// The validity period ends at or before it starts.
    #[error("Validity period ends at {valid_to} which is not after {valid_from}")]
    InvalidPeriod {
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    },

    /// The consent record digest is empty or not hex.
    #[error("Consent record hash is not a hex digest: {0:?}")]
    MalformedRecordHash(String),
}
