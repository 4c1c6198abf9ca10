//! # Verifier Service
//!
//! The single entry point orchestration calls. Wires the pure command
//! rule sets to the optional duplicate-consent policy and reports
//! verdicts through tracing.

use crate::domain::bundle::TransactionBundle;
use crate::domain::commands::check_command_combination;
use crate::domain::rejection::TransitionRejection;
use crate::ports::outbound::DuplicateConsentCheck;
use std::sync::Arc;
use tracing::{debug, warn};

/// Verifies proposed transitions. Stateless apart from the injected
/// duplicate policy; any number of verifications may run concurrently.
#[derive(Clone, Default)]
pub struct TransitionVerifier {
    duplicate_check: Option<Arc<dyn DuplicateConsentCheck>>,
}

impl TransitionVerifier {
    /// A verifier with no duplicate policy: it never deduplicates.
    pub fn new() -> Self {
        Self {
            duplicate_check: None,
        }
    }

    /// A verifier that consults `check` for every consent record digest
    /// present in a bundle's attachment metadata.
    pub fn with_duplicate_check(check: Arc<dyn DuplicateConsentCheck>) -> Self {
        Self {
            duplicate_check: Some(check),
        }
    }

    /// Verify a proposed transition.
    ///
    /// Checks the declared command combination and the bundle's content
    /// addressing, consults the duplicate policy if one is injected,
    /// then dispatches every declared command's rule set. The first
    /// violated invariant rejects the bundle.
    pub fn verify(&self, bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
        let verdict = self.verify_inner(bundle);

        match &verdict {
            Ok(()) => debug!(commands = ?bundle.commands, "transition accepted"),
            Err(rejection) => {
                warn!(commands = ?bundle.commands, %rejection, "transition rejected")
            }
        }

        verdict
    }

    fn verify_inner(&self, bundle: &TransactionBundle) -> Result<(), TransitionRejection> {
        check_command_combination(&bundle.commands)?;
        bundle.check_content_addresses()?;

        if let Some(check) = &self.duplicate_check {
            for metadata in bundle.decoded_metadata()?.values() {
                if check.is_duplicate(&metadata.consent_record_hash) {
                    return Err(TransitionRejection::DuplicateConsent {
                        hash: metadata.consent_record_hash.clone(),
                    });
                }
            }
        }

        for command in &bundle.commands {
            command.validate(bundle)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for TransitionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionVerifier")
            .field("duplicate_check", &self.duplicate_check.is_some())
            .finish()
    }
}
