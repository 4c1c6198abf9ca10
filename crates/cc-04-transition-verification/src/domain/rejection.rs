//! # Rejection Taxonomy
//!
//! Every way a transition can fail, each a distinct tagged reason.
//! Cryptographic and decode failures fold into typed variants here;
//! nothing escapes the verifier as an unstructured crash.

use cc_01_consent_metadata::MetadataError;
use shared_types::{short_hex, EntityUri, Hash, PartyId};
use thiserror::Error;

/// Why a proposed transition is inadmissible.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionRejection {
    /// The bundle consumes the wrong number of records or branches.
    #[error("Expected {expected} consumed {kind}, found {found}")]
    WrongInputCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// The bundle produces the wrong number of records or branches.
    #[error("Expected {expected} produced {kind}, found {found}")]
    WrongOutputCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// The produced record does not carry the successor version.
    #[error("Expected record version {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// State, branch, and bundle attachment sets disagree.
    #[error("Attachment sets disagree: {context}")]
    AttachmentSetMismatch { context: &'static str },

    /// A bundle attachment's bytes do not hash to its declared address.
    #[error("Attachment {} content does not hash to its address", short_hex(.attachment))]
    ContentHashMismatch { attachment: Hash },

    /// The branch adds nothing over the record it extends.
    #[error("Branch adds no attachments")]
    NoNewAttachments,

    /// Update declared, but no attachment supersedes an existing one.
    #[error("No actual update present")]
    NoActualUpdate,

    /// An attachment references a predecessor outside the consumed record.
    #[error("Attachment {} references predecessor {} outside the consumed record",
            short_hex(.attachment), short_hex(.predecessor))]
    PredecessorNotFound {
        attachment: Hash,
        predecessor: Hash,
    },

    /// Add declared, but an attachment carries a predecessor reference.
    #[error("Attachment {} carries a predecessor reference in a pure add", short_hex(.attachment))]
    UnexpectedPredecessor { attachment: Hash },

    /// A participant list is empty where at least one party is required.
    #[error("No participants declared")]
    NoParticipants,

    /// A participant list names the same party twice.
    #[error("Participant list names a party twice")]
    DuplicateParticipant,

    /// A declared participant's key is missing from the signer set.
    #[error("Participant {} is not a transaction signer", short_hex(.participant))]
    MissingSigner { participant: PartyId },

    /// Declared legal entities do not match the attachment metadata.
    #[error("Declared legal entities do not match attachment metadata")]
    LegalEntityMismatch,

    /// A merge lacks the full signature matrix.
    #[error("Expected {expected} signatures for a complete branch, found {found}")]
    IncompleteSignatures { expected: usize, found: usize },

    /// Sign must append exactly one signature.
    #[error("Sign must append exactly one signature, found {found} new")]
    SignatureCountMismatch { found: usize },

    /// Two signatures share an (entity, attachment) pair.
    #[error("Duplicate signature by {legal_entity} over attachment {}", short_hex(.attachment))]
    DuplicateSignature {
        legal_entity: EntityUri,
        attachment: Hash,
    },

    /// A signature names an attachment the branch does not declare.
    #[error("Signature covers undeclared attachment {}", short_hex(.attachment))]
    SignatureNotForDeclaredAttachment { attachment: Hash },

    /// A signature fails cryptographic verification.
    #[error("Signature by {legal_entity} does not verify")]
    InvalidSignature { legal_entity: EntityUri },

    /// An attachment's metadata descriptor is malformed or invalid.
    #[error("Malformed metadata for attachment {}: {source}", short_hex(.attachment))]
    MalformedMetadata {
        attachment: Hash,
        source: MetadataError,
    },

    /// The consumed branch is not open.
    #[error("Branch is not open")]
    BranchNotOpen,

    /// A closed branch lacks its closing reason or comment.
    #[error("Closed branch lacks a closing reason")]
    MissingClosingReason,

    /// A field that must carry over unchanged drifted.
    #[error("Field must not change across this transition: {field}")]
    InvariantFieldChanged { field: &'static str },

    /// The declared command set is not a valid combination.
    #[error("Declared commands cannot be combined in one bundle")]
    ConflictingCommands,

    /// The injected duplicate policy recognised this consent record.
    #[error("Consent record already known: {hash}")]
    DuplicateConsent { hash: String },
}
