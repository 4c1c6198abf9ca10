//! # Verification Request/Result Types

use shared_types::AttachmentSignature;

/// One endorsement paired with the content bytes it claims to cover.
#[derive(Clone, Copy, Debug)]
pub struct ContentVerification<'a> {
    /// The endorsement under test.
    pub signature: &'a AttachmentSignature,
    /// Raw bytes backing the attachment hash the endorsement names.
    pub content: &'a [u8],
}

/// Result of verifying a batch of endorsements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Whether every endorsement verified.
    pub all_valid: bool,
    /// Count of valid endorsements.
    pub valid_count: usize,
    /// Count of invalid endorsements.
    pub invalid_count: usize,
}

impl BatchOutcome {
    /// Fold individual verdicts into a batch outcome.
    pub fn from_verdicts(verdicts: &[bool]) -> Self {
        let valid_count = verdicts.iter().filter(|valid| **valid).count();
        let invalid_count = verdicts.len() - valid_count;

        Self {
            all_valid: invalid_count == 0,
            valid_count,
            invalid_count,
        }
    }
}
