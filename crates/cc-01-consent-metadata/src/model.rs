//! # Metadata Descriptor Model
//!
//! The semantic fields of a consent document's metadata descriptor.
//! The wire form is JSON with camelCase keys and hex-encoded hashes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{EntityUri, Hash};
use std::collections::BTreeSet;

/// Care domain a consent document applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Medical,
    Pgo,
    Insurance,
    Social,
}

/// Symmetric key material for the consent document itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetricKey {
    /// Algorithm identifier, e.g. `AES_GCM_256`.
    pub alg: String,
    /// Initialisation vector, base64.
    pub iv: String,
}

/// The document key wrapped for one organisation's public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationKey {
    /// The legal entity this wrapper is addressed to.
    pub legal_entity: EntityUri,
    /// Wrapping algorithm identifier, e.g. `RSA_3K`.
    pub alg: String,
    /// The wrapped key, base64.
    pub cipher_text: String,
}

/// Validity window of a consent document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriod {
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity; open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
}

/// The per-attachment metadata descriptor.
///
/// `previous_attachment_id` links this document to the attachment it
/// supersedes; its presence is what distinguishes an update of an
/// existing logical document from a pure add.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentMetadata {
    /// Domains the document covers. Must be non-empty.
    pub domains: Vec<Domain>,
    /// Symmetric key material for the document.
    pub secure_key: SymmetricKey,
    /// Per-organisation key wrappers. Must be non-empty.
    pub organisation_secure_keys: Vec<OrganisationKey>,
    /// Content hash of the attachment this document supersedes, if any.
    #[serde_as(as = "Option<Hex>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_attachment_id: Option<Hash>,
    /// Validity window.
    pub period: ValidityPeriod,
    /// Hex digest used by orchestration for duplicate detection. The
    /// verifier only checks the field is structurally sound.
    pub consent_record_hash: String,
}

impl ConsentMetadata {
    /// The legal entities named by the organisation key wrappers.
    pub fn legal_entities(&self) -> BTreeSet<EntityUri> {
        self.organisation_secure_keys
            .iter()
            .map(|key| key.legal_entity.clone())
            .collect()
    }
}
