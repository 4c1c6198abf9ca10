//! # Consent Commands
//!
//! The declared intent of a transition, as a sum type. Each variant
//! carries its own validation function; the shared rules they all apply
//! live in `general`, invoked by each rule set rather than inherited.

use crate::domain::bundle::TransactionBundle;
use crate::domain::rejection::TransitionRejection;
use serde::{Deserialize, Serialize};

/// The six transition kinds of the consent ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentCommand {
    /// Create a version-1 record with no attachments.
    Genesis,
    /// Fork a branch adding new consent documents.
    Add,
    /// Fork a branch superseding existing consent documents.
    Update,
    /// Append one endorsement to an open branch.
    Sign,
    /// Abandon an open branch.
    Close,
    /// Fold a fully signed branch back into the record.
    Merge,
}

impl ConsentCommand {
    /// Apply this command's rule set to the bundle.
    pub fn validate(&self, bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
        match self {
            Self::Genesis => crate::domain::verify_genesis(bundle),
            Self::Add => crate::domain::verify_add(bundle),
            Self::Update => crate::domain::verify_update(bundle),
            Self::Sign => crate::domain::verify_sign(bundle),
            Self::Close => crate::domain::verify_close(bundle),
            Self::Merge => crate::domain::verify_merge(bundle),
        }
    }
}

/// Check the declared command set is admissible: exactly one command,
/// or the Add + Update pair for a branch that both adds and supersedes.
pub fn check_command_combination(
    commands: &[ConsentCommand],
) -> Result<(), TransitionRejection> {
    match commands {
        [_] => Ok(()),
        [ConsentCommand::Add, ConsentCommand::Update]
        | [ConsentCommand::Update, ConsentCommand::Add] => Ok(()),
        _ => Err(TransitionRejection::ConflictingCommands),
    }
}
