//! # Predecessor Chains and Add/Update Classification
//!
//! An attachment whose metadata names a `previous_attachment_id` claims
//! to supersede an existing logical document. A set of new attachments
//! is an *update* only when at least one such reference resolves inside
//! the input record's attachment set; with no references at all the set
//! is a pure *add*.

use crate::errors::AlgebraError;
use cc_01_consent_metadata::ConsentMetadata;
use shared_types::{EntityUri, Hash};
use std::collections::{BTreeMap, BTreeSet};

/// How a set of new attachments changes the record it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Every attachment is a new logical document.
    PureAdd,
    /// At least one attachment supersedes a document already present.
    Update,
}

/// Collect the predecessor hashes referenced by `attachments`.
///
/// Attachments absent from `metadata_of` are skipped; whether metadata
/// must exist for every attachment is decided by the command rules,
/// not here.
pub fn referenced_predecessors<'a>(
    attachments: impl IntoIterator<Item = &'a Hash>,
    metadata_of: &BTreeMap<Hash, ConsentMetadata>,
) -> BTreeSet<Hash> {
    attachments
        .into_iter()
        .filter_map(|attachment| metadata_of.get(attachment))
        .filter_map(|metadata| metadata.previous_attachment_id)
        .collect()
}

/// The union of legal entities named across the metadata of
/// `attachments`. Entities are compared as a set throughout; their
/// order in any descriptor carries no meaning.
pub fn declared_entities<'a>(
    attachments: impl IntoIterator<Item = &'a Hash>,
    metadata_of: &BTreeMap<Hash, ConsentMetadata>,
) -> BTreeSet<EntityUri> {
    attachments
        .into_iter()
        .filter_map(|attachment| metadata_of.get(attachment))
        .flat_map(|metadata| metadata.legal_entities())
        .collect()
}

/// Classify a set of new attachments against the record they extend.
///
/// Returns [`ChangeKind::Update`] when at least one predecessor
/// reference resolves into `record_attachments`; a reference that
/// resolves nowhere is [`AlgebraError::PredecessorNotFound`]. With no
/// references at all the change is a [`ChangeKind::PureAdd`].
pub fn classify_change(
    record_attachments: &BTreeSet<Hash>,
    new_attachments: &BTreeSet<Hash>,
    metadata_of: &BTreeMap<Hash, ConsentMetadata>,
) -> Result<ChangeKind, AlgebraError> {
    let mut saw_reference = false;

    for attachment in new_attachments {
        let Some(metadata) = metadata_of.get(attachment) else {
            continue;
        };
        let Some(predecessor) = metadata.previous_attachment_id else {
            continue;
        };

        if !record_attachments.contains(&predecessor) {
            return Err(AlgebraError::PredecessorNotFound {
                attachment: *attachment,
                predecessor,
            });
        }
        saw_reference = true;
    }

    if saw_reference {
        Ok(ChangeKind::Update)
    } else {
        Ok(ChangeKind::PureAdd)
    }
}
