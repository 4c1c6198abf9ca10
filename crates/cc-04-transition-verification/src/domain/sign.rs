//! # Sign Rules
//!
//! Appending one endorsement to an open branch. Everything about the
//! branch except the signature list must carry over unchanged, and the
//! new endorsement must be by a declared entity, over a declared
//! attachment, and cryptographically valid against the attachment's
//! raw bytes.

use crate::domain::bundle::TransactionBundle;
use crate::domain::general;
use crate::domain::rejection::TransitionRejection;
use cc_02_signature_verification::verify_attachment_signature;
use cc_03_attachment_algebra::{declared_entities, same_set};

/// Validate a Sign transition.
pub fn verify_sign(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    general::expect_consumed_records(bundle, 0)?;
    general::expect_consumed_branches(bundle, 1)?;
    general::expect_produced_records(bundle, 0)?;
    general::expect_produced_branches(bundle, 1)?;

    let input = &bundle.consumed_branches[0];
    let output = &bundle.produced_branches[0];

    if !input.is_open() || !output.is_open() {
        return Err(TransitionRejection::BranchNotOpen);
    }

    general::require_unchanged("branch identity", &input.identity(), &output.identity())?;
    general::require_unchanged("branch point", &input.branch_point, &output.branch_point)?;
    if !same_set(input.attachments(), output.attachments()) {
        return Err(TransitionRejection::InvariantFieldChanged {
            field: "branch attachments",
        });
    }
    general::require_unchanged(
        "branch legal entities",
        &input.entity_set(),
        &output.entity_set(),
    )?;
    general::require_unchanged(
        "branch participants",
        &input.core.participants,
        &output.core.participants,
    )?;
    general::require_unchanged(
        "initiating node",
        &input.initiating_node,
        &output.initiating_node,
    )?;
    general::require_unchanged(
        "initiating legal entity",
        &input.initiating_legal_entity,
        &output.initiating_legal_entity,
    )?;
    general::require_unchanged("branch time", &input.branch_time, &output.branch_time)?;
    general::require_unchanged("state time", &input.state_time, &output.state_time)?;
    if output.closing_reason.is_some() || output.closing_comment.is_some() {
        return Err(TransitionRejection::InvariantFieldChanged {
            field: "closing fields",
        });
    }

    // Exactly one endorsement is appended; prior ones carry over.
    if output.signatures.len() != input.signatures.len() + 1 {
        return Err(TransitionRejection::SignatureCountMismatch {
            found: output.signatures.len().saturating_sub(input.signatures.len()),
        });
    }
    for existing in &input.signatures {
        if !output.signatures.contains(existing) {
            return Err(TransitionRejection::InvariantFieldChanged {
                field: "existing signatures",
            });
        }
    }

    if let Some(rejection) = general::find_duplicate_signature(&output.signatures) {
        return Err(rejection);
    }

    let appended = output
        .signatures
        .iter()
        .filter(|signature| !input.signatures.contains(signature))
        .collect::<Vec<_>>();
    let [appended] = appended.as_slice() else {
        return Err(TransitionRejection::SignatureCountMismatch {
            found: appended.len(),
        });
    };

    if !output.attachments().contains(&appended.attachment) {
        return Err(TransitionRejection::SignatureNotForDeclaredAttachment {
            attachment: appended.attachment,
        });
    }

    general::check_bundle_matches_branch(bundle, output)?;
    let metadata = bundle.decoded_metadata()?;
    if !declared_entities(output.attachments(), &metadata).contains(&appended.legal_entity) {
        return Err(TransitionRejection::LegalEntityMismatch);
    }

    // Bundle equality above guarantees the content is present.
    let content = bundle
        .content_of(&appended.attachment)
        .ok_or(TransitionRejection::SignatureNotForDeclaredAttachment {
            attachment: appended.attachment,
        })?;
    if !verify_attachment_signature(appended, content) {
        return Err(TransitionRejection::InvalidSignature {
            legal_entity: appended.legal_entity.clone(),
        });
    }

    general::check_participants(&output.core, &bundle.signers)?;

    Ok(())
}
