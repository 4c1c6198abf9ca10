//! # Core Domain Entities
//!
//! Defines the consent-ledger entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **State**: `ConsentRecord`, `ConsentBranch`, `ConsentCore`
//! - **Endorsement**: `AttachmentSignature`
//! - **Identity**: `RecordIdentity`, `BranchIdentity`, `EntityUri`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::collections::BTreeSet;
use uuid::Uuid;

// =============================================================================
// PRIMITIVE ALIASES
// =============================================================================

/// A 32-byte SHA-256 content hash. Attachments are identified by the
/// hash of their raw bytes.
pub type Hash = [u8; 32];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type SignatureBytes = [u8; 64];

/// A participant in a consent transition. Participants are cryptographic
/// identities; their public key must appear in a bundle's signer set.
pub type PartyId = PublicKey;

/// Render the leading bytes of a hash for logs and error messages.
pub fn short_hex(hash: &Hash) -> String {
    format!("{}..", hex::encode(&hash[..4]))
}

// =============================================================================
// IDENTITY TYPES
// =============================================================================

/// URI identifying a legal entity (an organization that must endorse
/// attachments concerning it), e.g. `urn:oid:2.16.840.1.113883.2.4.6.1:00000001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityUri(pub String);

impl EntityUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity of a consent record across all of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIdentity {
    /// Caller-supplied external identifier (e.g. a subject/custodian pair).
    pub external_id: String,
    /// Ledger-unique identifier, fixed at Genesis.
    pub record_id: Uuid,
}

/// Identity of a proposed branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchIdentity {
    /// External identifier, shared with the record being branched.
    pub external_id: String,
    /// Ledger-unique identifier of this branch.
    pub branch_id: Uuid,
}

// =============================================================================
// SHARED CORE
// =============================================================================

/// The fields a record and a branch have in common: one logical consent
/// state seen from two views. Embedded by value in both types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCore {
    /// External identifier, stable across the record's lifetime.
    pub external_id: String,
    /// Content hashes of the consent documents this state covers.
    pub attachments: BTreeSet<Hash>,
    /// Parties that must co-sign every transition of this state.
    ///
    /// Kept as a list: uniqueness is a verifier invariant, so a
    /// duplicated participant stays observable and rejectable.
    pub participants: Vec<PartyId>,
}

impl ConsentCore {
    /// Participants as a set, collapsing duplicates.
    pub fn participant_set(&self) -> BTreeSet<PartyId> {
        self.participants.iter().copied().collect()
    }

    /// True if the participant list names any party twice.
    pub fn has_duplicate_participants(&self) -> bool {
        self.participant_set().len() != self.participants.len()
    }
}

// =============================================================================
// CONSENT RECORD
// =============================================================================

/// Canonical, versioned consent state for one subject/custodian identity.
///
/// Created by Genesis at version 1 with no attachments; replaced (never
/// mutated) by Add/Update and Merge, each producing version + 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Fields shared with branches of this record.
    pub core: ConsentCore,
    /// Ledger-unique identifier, fixed at Genesis.
    pub record_id: Uuid,
    /// Monotonic version counter, starting at 1.
    pub version: u32,
}

impl ConsentRecord {
    /// Create the version-1 record produced by a Genesis transition.
    pub fn genesis(external_id: impl Into<String>, participants: Vec<PartyId>) -> Self {
        Self {
            core: ConsentCore {
                external_id: external_id.into(),
                attachments: BTreeSet::new(),
                participants,
            },
            record_id: Uuid::new_v4(),
            version: 1,
        }
    }

    /// The stable identity of this record.
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity {
            external_id: self.core.external_id.clone(),
            record_id: self.record_id,
        }
    }

    pub fn attachments(&self) -> &BTreeSet<Hash> {
        &self.core.attachments
    }

    pub fn participants(&self) -> &[PartyId] {
        &self.core.participants
    }

    /// The successor of this record: same identity, version + 1.
    /// Attachment/participant changes are applied by the caller.
    pub fn next_version(&self) -> Self {
        Self {
            core: self.core.clone(),
            record_id: self.record_id,
            version: self.version + 1,
        }
    }
}

// =============================================================================
// ATTACHMENT SIGNATURE
// =============================================================================

/// A legal entity's endorsement of one attachment, verified against the
/// raw bytes backing `attachment`.
///
/// Uniqueness within a branch is defined by the (legal_entity, attachment)
/// pair; the signing key is evidence, not identity.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSignature {
    /// The endorsing legal entity.
    pub legal_entity: EntityUri,
    /// Content hash of the endorsed attachment.
    pub attachment: Hash,
    /// Ed25519 public key the signature verifies under.
    pub public_key: PublicKey,
    /// Ed25519 signature over the attachment's raw bytes.
    #[serde_as(as = "Bytes")]
    pub signature: SignatureBytes,
}

impl AttachmentSignature {
    /// The pair that defines signature uniqueness within a branch.
    pub fn uniqueness_key(&self) -> (EntityUri, Hash) {
        (self.legal_entity.clone(), self.attachment)
    }
}

// =============================================================================
// CONSENT BRANCH
// =============================================================================

/// Lifecycle of a branch. A branch is born Open, collects signatures
/// while Open, and either closes (terminal) or is consumed by a Merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchLifecycle {
    /// Accepting signatures.
    Open,
    /// Abandoned; non-mergeable.
    Closed,
}

/// A proposed, not-yet-merged change to a consent record, collecting
/// multi-party signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentBranch {
    /// Fields shared with the record this branch proposes to change.
    /// `core.attachments` is the branch's full proposed set: the prior
    /// record attachments plus at least one new document.
    pub core: ConsentCore,
    /// Ledger-unique identifier of this branch.
    pub branch_id: Uuid,
    /// Identity of the record version this branch was forked from.
    pub branch_point: RecordIdentity,
    /// Legal entities that must endorse this branch, derived from the
    /// organisation keys across all attachment metadata.
    pub legal_entities: Vec<EntityUri>,
    /// Endorsements collected so far.
    pub signatures: Vec<AttachmentSignature>,
    /// Open or Closed.
    pub lifecycle: BranchLifecycle,
    /// Name of the node that initiated the branch.
    pub initiating_node: String,
    /// Legal entity on whose behalf the branch was initiated.
    pub initiating_legal_entity: String,
    /// When the branch was created.
    pub branch_time: DateTime<Utc>,
    /// Consent state time the branch refers to.
    pub state_time: DateTime<Utc>,
    /// Why the branch was closed. Set by Close, absent while Open.
    pub closing_reason: Option<String>,
    /// Free-text comment accompanying the closing reason.
    pub closing_comment: Option<String>,
}

impl ConsentBranch {
    /// The identity of this branch.
    pub fn identity(&self) -> BranchIdentity {
        BranchIdentity {
            external_id: self.core.external_id.clone(),
            branch_id: self.branch_id,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle == BranchLifecycle::Open
    }

    pub fn attachments(&self) -> &BTreeSet<Hash> {
        &self.core.attachments
    }

    /// Declared legal entities as a set. Entity order carries no meaning;
    /// the list form only mirrors how branches arrive off the wire.
    pub fn entity_set(&self) -> BTreeSet<EntityUri> {
        self.legal_entities.iter().cloned().collect()
    }

    /// The (entity, attachment) pairs covered by collected signatures.
    pub fn signature_pairs(&self) -> BTreeSet<(EntityUri, Hash)> {
        self.signatures
            .iter()
            .map(AttachmentSignature::uniqueness_key)
            .collect()
    }

    /// True if two collected signatures share an (entity, attachment) pair.
    pub fn has_duplicate_signatures(&self) -> bool {
        self.signature_pairs().len() != self.signatures.len()
    }
}
