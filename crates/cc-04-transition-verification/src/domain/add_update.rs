//! # Add / Update Rules
//!
//! Both commands fork a branch off a record: one record consumed, its
//! v+1 successor produced unchanged, and one open branch carrying the
//! successor attachment set. They differ only in how the new
//! attachments relate to the record: an Add brings documents with no
//! predecessor references, an Update supersedes documents already
//! present. A single branch carrying both kinds declares both commands,
//! and each rule set applies to the same bundle independently.

use crate::domain::bundle::TransactionBundle;
use crate::domain::commands::ConsentCommand;
use crate::domain::general;
use crate::domain::rejection::TransitionRejection;
use cc_01_consent_metadata::ConsentMetadata;
use cc_03_attachment_algebra::{
    added_attachments, classify_change, declared_entities, extends, same_set, AlgebraError,
    ChangeKind,
};
use shared_types::{ConsentBranch, ConsentRecord, Hash};
use std::collections::{BTreeMap, BTreeSet};

/// The validated shape shared by Add and Update, handed to each
/// command's own classification clause.
struct BranchCreation<'a> {
    input: &'a ConsentRecord,
    metadata: BTreeMap<Hash, ConsentMetadata>,
    new_attachments: BTreeSet<Hash>,
}

/// The structural rules common to Add and Update.
fn verify_branch_creation(
    bundle: &TransactionBundle,
) -> Result<BranchCreation<'_>, TransitionRejection> {
    general::expect_consumed_records(bundle, 1)?;
    general::expect_consumed_branches(bundle, 0)?;
    general::expect_produced_records(bundle, 1)?;
    general::expect_produced_branches(bundle, 1)?;

    let input = &bundle.consumed_records[0];
    let output = &bundle.produced_records[0];
    let branch: &ConsentBranch = &bundle.produced_branches[0];

    // Successor record: version steps, everything else carries over.
    if output.version != input.version + 1 {
        return Err(TransitionRejection::VersionMismatch {
            expected: input.version + 1,
            found: output.version,
        });
    }
    general::require_unchanged("record identity", &input.identity(), &output.identity())?;
    if !same_set(output.attachments(), input.attachments()) {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "record attachments must carry over unchanged",
        });
    }
    general::require_unchanged(
        "record participants",
        &input.core.participants,
        &output.core.participants,
    )?;

    // Newborn branch: open, unsigned, forked from the consumed record.
    if !branch.is_open() {
        return Err(TransitionRejection::BranchNotOpen);
    }
    if !branch.signatures.is_empty() {
        return Err(TransitionRejection::InvariantFieldChanged {
            field: "branch signatures",
        });
    }
    general::require_unchanged("branch point", &branch.branch_point, &input.identity())?;
    general::require_unchanged(
        "branch identity",
        &branch.core.external_id,
        &input.core.external_id,
    )?;

    // The branch proposes the record's set plus at least one document.
    if branch.attachments().is_empty() {
        return Err(TransitionRejection::NoNewAttachments);
    }
    if !extends(input.attachments(), branch.attachments()) {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "branch must extend the record's attachments",
        });
    }
    let new_attachments = added_attachments(input.attachments(), branch.attachments());
    if new_attachments.is_empty() {
        return Err(TransitionRejection::NoNewAttachments);
    }

    general::check_bundle_matches_branch(bundle, branch)?;

    let metadata = bundle.decoded_metadata()?;

    // Entity coverage is derived from metadata and compared as a set.
    if declared_entities(branch.attachments(), &metadata) != branch.entity_set() {
        return Err(TransitionRejection::LegalEntityMismatch);
    }

    general::check_participants(&branch.core, &bundle.signers)?;
    general::check_participants(&output.core, &bundle.signers)?;

    Ok(BranchCreation {
        input,
        metadata,
        new_attachments,
    })
}

/// Validate an Add transition.
pub fn verify_add(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    let creation = verify_branch_creation(bundle)?;

    // In a combined Add + Update bundle, chain continuity of the
    // superseding attachments is Update's rule; a standalone Add must
    // carry no predecessor references at all.
    if bundle.commands.contains(&ConsentCommand::Update) {
        return Ok(());
    }

    for attachment in &creation.new_attachments {
        if let Some(metadata) = creation.metadata.get(attachment) {
            if metadata.previous_attachment_id.is_some() {
                return Err(TransitionRejection::UnexpectedPredecessor {
                    attachment: *attachment,
                });
            }
        }
    }

    Ok(())
}

/// Validate an Update transition.
pub fn verify_update(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    let creation = verify_branch_creation(bundle)?;

    match classify_change(
        creation.input.attachments(),
        &creation.new_attachments,
        &creation.metadata,
    ) {
        Ok(ChangeKind::Update) => Ok(()),
        Ok(ChangeKind::PureAdd) => Err(TransitionRejection::NoActualUpdate),
        Err(AlgebraError::PredecessorNotFound {
            attachment,
            predecessor,
        }) => Err(TransitionRejection::PredecessorNotFound {
            attachment,
            predecessor,
        }),
    }
}
