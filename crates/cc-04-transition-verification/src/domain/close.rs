//! # Close Rules
//!
//! Abandoning an open branch. The branch flips to Closed with a reason
//! and comment; everything else, including however many signatures were
//! collected, carries over unchanged. A closed branch is terminal.

use crate::domain::bundle::TransactionBundle;
use crate::domain::general;
use crate::domain::rejection::TransitionRejection;
use cc_03_attachment_algebra::same_set;
use shared_types::BranchLifecycle;

/// Validate a Close transition.
pub fn verify_close(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    general::expect_consumed_records(bundle, 0)?;
    general::expect_consumed_branches(bundle, 1)?;
    general::expect_produced_records(bundle, 0)?;
    general::expect_produced_branches(bundle, 1)?;

    let input = &bundle.consumed_branches[0];
    let output = &bundle.produced_branches[0];

    if !input.is_open() {
        return Err(TransitionRejection::BranchNotOpen);
    }

    if output.lifecycle != BranchLifecycle::Closed {
        return Err(TransitionRejection::InvariantFieldChanged {
            field: "branch lifecycle",
        });
    }

    match (&output.closing_reason, &output.closing_comment) {
        (Some(reason), Some(_)) if !reason.is_empty() => {}
        _ => return Err(TransitionRejection::MissingClosingReason),
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
    general::require_unchanged("branch signatures", &input.signatures, &output.signatures)?;
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

    general::check_participants(&output.core, &bundle.signers)?;

    Ok(())
}
