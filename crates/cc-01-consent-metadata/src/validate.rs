//! # Descriptor Validation
//!
//! Internal invariants of a decoded metadata descriptor. Validation is
//! pure and short-circuits on the first violated clause.

use crate::errors::MetadataError;
use crate::model::ConsentMetadata;

impl ConsentMetadata {
    /// Check the descriptor's internal invariants:
    ///
    /// - at least one domain,
    /// - at least one organisation key wrapper,
    /// - `valid_to`, when present, strictly after `valid_from`,
    /// - `consent_record_hash` a non-empty hex digest.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.domains.is_empty() {
            return Err(MetadataError::EmptyDomainList);
        }

        if self.organisation_secure_keys.is_empty() {
            return Err(MetadataError::EmptyKeyList);
        }

        if let Some(valid_to) = self.period.valid_to {
            if valid_to <= self.period.valid_from {
                return Err(MetadataError::InvalidPeriod {
                    valid_from: self.period.valid_from,
                    valid_to,
                });
            }
        }

        if self.consent_record_hash.is_empty()
            || hex::decode(&self.consent_record_hash).is_err()
        {
            return Err(MetadataError::MalformedRecordHash(
                self.consent_record_hash.clone(),
            ));
        }

        Ok(())
    }
}
