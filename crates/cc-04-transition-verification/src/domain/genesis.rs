//! # Genesis Rules
//!
//! Creation of a consent record: no inputs, one version-1 record with
//! no attachments, and every participant signing.

use crate::domain::bundle::TransactionBundle;
use crate::domain::general;
use crate::domain::rejection::TransitionRejection;

/// Validate a Genesis transition.
pub fn verify_genesis(bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
    general::expect_consumed_records(bundle, 0)?;
    general::expect_consumed_branches(bundle, 0)?;
    general::expect_produced_records(bundle, 1)?;
    general::expect_produced_branches(bundle, 0)?;

    let record = &bundle.produced_records[0];

    if record.version != 1 {
        return Err(TransitionRejection::VersionMismatch {
            expected: 1,
            found: record.version,
        });
    }

    if !record.attachments().is_empty() {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "genesis record must carry no attachments",
        });
    }

    if !bundle.attachments.is_empty() {
        return Err(TransitionRejection::AttachmentSetMismatch {
            context: "genesis bundle must carry no attachments",
        });
    }

    general::check_participants(&record.core, &bundle.signers)?;

    Ok(())
}
