//! # Shared Command Rules
//!
//! The rules every command applies: input/output shape counts,
//! participant uniqueness and signer coverage, and field-preservation
//! checks. Each command's rule set calls these helpers; there is no
//! rule-set inheritance.

use crate::domain::bundle::TransactionBundle;
use crate::domain::rejection::TransitionRejection;
use cc_03_attachment_algebra::same_set;
use shared_types::{ConsentBranch, ConsentCore, PublicKey};
use std::collections::BTreeSet;

pub(crate) fn expect_consumed_records(
    bundle: &TransactionBundle,
    expected: usize,
) -> Result<(), TransitionRejection> {
    let found = bundle.consumed_records.len();
    if found != expected {
        return Err(TransitionRejection::WrongInputCount {
            kind: "records",
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn expect_consumed_branches(
    bundle: &TransactionBundle,
    expected: usize,
) -> Result<(), TransitionRejection> {
    let found = bundle.consumed_branches.len();
    if found != expected {
        return Err(TransitionRejection::WrongInputCount {
            kind: "branches",
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn expect_produced_records(
    bundle: &TransactionBundle,
    expected: usize,
) -> Result<(), TransitionRejection> {
    let found = bundle.produced_records.len();
    if found != expected {
        return Err(TransitionRejection::WrongOutputCount {
            kind: "records",
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn expect_produced_branches(
    bundle: &TransactionBundle,
    expected: usize,
) -> Result<(), TransitionRejection> {
    let found = bundle.produced_branches.len();
    if found != expected {
        return Err(TransitionRejection::WrongOutputCount {
            kind: "branches",
            expected,
            found,
        });
    }
    Ok(())
}

/// Participants must be declared, unique, and every one a signer.
pub(crate) fn check_participants(
    core: &ConsentCore,
    signers: &BTreeSet<PublicKey>,
) -> Result<(), TransitionRejection> {
    if core.participants.is_empty() {
        return Err(TransitionRejection::NoParticipants);
    }

    if core.has_duplicate_participants() {
        return Err(TransitionRejection::DuplicateParticipant);
    }

    for participant in &core.participants {
        if !signers.contains(participant) {
            return Err(TransitionRejection::MissingSigner {
                participant: *participant,
            });
        }
    }

    Ok(())
}

/// A field that must carry over a transition unchanged.
pub(crate) fn require_unchanged<T: PartialEq>(
    field: &'static str,
    before: &T,
    after: &T,
) -> Result<(), TransitionRejection> {
    if before != after {
        return Err(TransitionRejection::InvariantFieldChanged { field });
    }
    Ok(())
}

/// Find the first signature repeating an (entity, attachment) pair.
pub(crate) fn find_duplicate_signature(
    signatures: &[shared_types::AttachmentSignature],
) -> Option<TransitionRejection> {
    let mut seen = BTreeSet::new();
    for signature in signatures {
        if !seen.insert(signature.uniqueness_key()) {
            return Some(TransitionRejection::DuplicateSignature {
                legal_entity: signature.legal_entity.clone(),
                attachment: signature.attachment,
            });
        }
    }
    None
}

/// The attachments physically present must be exactly the branch's set.
pub(crate) fn check_bundle_matches_branch(
    bundle: &TransactionBundle,
    branch: &ConsentBranch,
) -> Result<(), TransitionRejection> {
    if !same_set(&bundle.attachment_set(), branch.attachments()) {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "bundle attachments must match the branch",
        });
    }
    Ok(())
}
