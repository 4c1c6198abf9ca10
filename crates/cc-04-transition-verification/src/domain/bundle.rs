//! # Transaction Bundle
//!
//! The external-facing value type the verifier consumes. Orchestration
//! gathers consumed and produced states, the attachments they name, and
//! the signer keys; the verifier only ever borrows a fully materialized
//! bundle and never performs I/O to complete one.

use crate::domain::commands::ConsentCommand;
use crate::domain::rejection::TransitionRejection;
use cc_01_consent_metadata::{decode_validated, ConsentMetadata};
use cc_02_signature_verification::content_hash;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{ConsentBranch, ConsentRecord, Hash, PublicKey};
use std::collections::{BTreeMap, BTreeSet};

/// One attachment physically present in a bundle: the raw document
/// bytes (the bytes endorsements are verified over) and the serialized
/// metadata descriptor that travels with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleAttachment {
    /// Raw bytes backing the attachment's content hash.
    pub content: Vec<u8>,
    /// Serialized metadata descriptor, decoded by cc-01.
    pub metadata: Vec<u8>,
}

/// A proposed transition, assembled by orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBundle {
    /// Declared intent. Exactly one command, except Add + Update which
    /// may co-occur for a single branch.
    pub commands: Vec<ConsentCommand>,
    /// Records consumed by this transition.
    pub consumed_records: Vec<ConsentRecord>,
    /// Branches consumed by this transition.
    pub consumed_branches: Vec<ConsentBranch>,
    /// Records produced by this transition.
    pub produced_records: Vec<ConsentRecord>,
    /// Branches produced by this transition.
    pub produced_branches: Vec<ConsentBranch>,
    /// Attachments present, keyed by content hash.
    pub attachments: BTreeMap<Hash, BundleAttachment>,
    /// Public keys that signed the transaction.
    pub signers: BTreeSet<PublicKey>,
}

impl TransactionBundle {
    /// The content hashes physically present in this bundle.
    pub fn attachment_set(&self) -> BTreeSet<Hash> {
        self.attachments.keys().copied().collect()
    }

    /// The raw bytes backing `hash`, if present.
    pub fn content_of(&self, hash: &Hash) -> Option<&[u8]> {
        self.attachments
            .get(hash)
            .map(|attachment| attachment.content.as_slice())
    }

    /// Check that every attachment's bytes hash to its declared address.
    ///
    /// Attachments are independent, so the digests run in parallel.
    pub fn check_content_addresses(&self) -> Result<(), TransitionRejection> {
        let mismatch = self.attachments.par_iter().find_map_first(|(hash, attachment)| {
            (content_hash(&attachment.content) != *hash)
                .then_some(TransitionRejection::ContentHashMismatch { attachment: *hash })
        });

        match mismatch {
            Some(rejection) => Err(rejection),
            None => Ok(()),
        }
    }

    /// Decode and validate the metadata descriptor of every attachment.
    ///
    /// Descriptors are independent, so decoding runs in parallel. The
    /// first malformed descriptor rejects the bundle.
    pub fn decoded_metadata(&self) -> Result<BTreeMap<Hash, ConsentMetadata>, TransitionRejection> {
        self.attachments
            .par_iter()
            .map(|(hash, attachment)| {
                decode_validated(&attachment.metadata)
                    .map(|metadata| (*hash, metadata))
                    .map_err(|source| TransitionRejection::MalformedMetadata {
                        attachment: *hash,
                        source,
                    })
            })
            .collect()
    }
}
