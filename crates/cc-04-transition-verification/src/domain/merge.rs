//! # Merge Rules
//!
//! Folding a fully signed branch back into its record. Completeness is
//! the signature matrix: every participant must have signed every
//! attachment, so the count equals attachments × participants exactly.
//! The merged record is the union of both inputs' attachments and
//! participants at version + 1.

use crate::domain::bundle::TransactionBundle;
use crate::domain::general;
use crate::domain::rejection::TransitionRejection;
use cc_02_signature_verification::verify_attachment_signature;
use cc_03_attachment_algebra::same_set;
use rayon::prelude::*;
use shared_types::Hash;
use std::collections::BTreeSet;

/// Validate a Merge transition.
pub fn verify_merge(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    general::expect_consumed_records(bundle, 1)?;
    general::expect_consumed_branches(bundle, 1)?;
    general::expect_produced_records(bundle, 1)?;
    general::expect_produced_branches(bundle, 0)?;

    let record = &bundle.consumed_records[0];
    let branch = &bundle.consumed_branches[0];
    let output = &bundle.produced_records[0];

    if !branch.is_open() {
        return Err(TransitionRejection::BranchNotOpen);
    }
    general::require_unchanged("branch point", &branch.branch_point, &record.identity())?;

    if output.version != record.version + 1 {
        return Err(TransitionRejection::VersionMismatch {
            expected: record.version + 1,
            found: output.version,
        });
    }
    general::require_unchanged("record identity", &record.identity(), &output.identity())?;

    // The signature matrix must be complete before anything is decrypted
    // or folded: every participant over every attachment.
    let expected = branch.attachments().len() * branch.core.participants.len();
    let found = branch.signatures.len();
    if found != expected {
        return Err(TransitionRejection::IncompleteSignatures { expected, found });
    }

    if let Some(rejection) = general::find_duplicate_signature(&branch.signatures) {
        return Err(rejection);
    }

    let entity_set = branch.entity_set();
    for signature in &branch.signatures {
        if !branch.attachments().contains(&signature.attachment) {
            return Err(TransitionRejection::SignatureNotForDeclaredAttachment {
                attachment: signature.attachment,
            });
        }
        if !entity_set.contains(&signature.legal_entity) {
            return Err(TransitionRejection::LegalEntityMismatch);
        }
    }

    // Contents must be physically present to verify against.
    for attachment in branch.attachments() {
        if !bundle.attachments.contains_key(attachment) {
            return Err(TransitionRejection::AttachmentSetMismatch {
                context: "bundle must carry every branch attachment",
            });
        }
    }

    // Endorsements are independent; verify them in parallel and report
    // the first invalid one in declaration order.
    let verdicts: Vec<bool> = branch
        .signatures
        .par_iter()
        .map(|signature| {
            bundle
                .content_of(&signature.attachment)
                .is_some_and(|content| verify_attachment_signature(signature, content))
        })
        .collect();
    if let Some(position) = verdicts.iter().position(|valid| !valid) {
        return Err(TransitionRejection::InvalidSignature {
            legal_entity: branch.signatures[position].legal_entity.clone(),
        });
    }

    let merged: BTreeSet<Hash> = record
        .attachments()
        .union(branch.attachments())
        .copied()
        .collect();
    if !same_set(output.attachments(), &merged) {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "merged record must union record and branch attachments",
        });
    }

    let merged_participants: BTreeSet<_> = record
        .core
        .participant_set()
        .union(&branch.core.participant_set())
        .copied()
        .collect();
    if output.core.participant_set() != merged_participants {
        return Err(TransitionRejection::InvariantFieldChanged {
            field: "record participants",
        });
    }
    general::check_participants(&output.core, &bundle.signers)?;

    Ok(())
}
