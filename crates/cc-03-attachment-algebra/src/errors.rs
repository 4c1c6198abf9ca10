//! # Algebra Errors

use shared_types::{short_hex, Hash};
use thiserror::Error;

/// Failures of predecessor-chain resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlgebraError {
    /// An attachment names a predecessor that is not part of the record
    /// being superseded.
    #[error("Attachment {} references predecessor {} outside the record's attachment set",
            short_hex(.attachment), short_hex(.predecessor))]
    PredecessorNotFound {
        attachment: Hash,
        predecessor: Hash,
    },
}
