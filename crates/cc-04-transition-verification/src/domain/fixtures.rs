//! Shared test fixtures for the command rule sets.

use crate::domain::bundle::{BundleAttachment, TransactionBundle};
use crate::domain::commands::ConsentCommand;
use cc_01_consent_metadata::{ConsentMetadata, Domain, OrganisationKey, SymmetricKey, ValidityPeriod};
use cc_02_signature_verification::content_hash;
use chrono::{DateTime, TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use shared_types::{
    AttachmentSignature, BranchLifecycle, ConsentBranch, ConsentCore, ConsentRecord, EntityUri,
    Hash, PartyId, PublicKey,
};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub(crate) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub(crate) fn keypair() -> (SigningKey, PublicKey) {
    let signing_key = SigningKey::generate(&mut rand::thread_rng());
    let public_key = signing_key.verifying_key().to_bytes();
    (signing_key, public_key)
}

pub(crate) fn entity(tag: u8) -> EntityUri {
    EntityUri::new(format!("urn:oid:2.16.840.1.113883.2.4.6.1:0000000{tag}"))
}

pub(crate) fn descriptor(entities: &[EntityUri], previous: Option<Hash>) -> ConsentMetadata {
    ConsentMetadata {
        domains: vec![Domain::Medical],
        secure_key: SymmetricKey {
            alg: "AES_GCM_256".into(),
            iv: "vQmuLdZn".into(),
        },
        organisation_secure_keys: entities
            .iter()
            .map(|legal_entity| OrganisationKey {
                legal_entity: legal_entity.clone(),
                alg: "RSA_3K".into(),
                cipher_text: "Y2lwaGVy".into(),
            })
            .collect(),
        previous_attachment_id: previous,
        period: ValidityPeriod {
            valid_from: timestamp(),
            valid_to: None,
        },
        consent_record_hash: "ab12cd34".into(),
    }
}

/// Build a bundle attachment from document bytes; returns its content
/// address alongside.
pub(crate) fn attachment(
    content: &[u8],
    entities: &[EntityUri],
    previous: Option<Hash>,
) -> (Hash, BundleAttachment) {
    let metadata = serde_json::to_vec(&descriptor(entities, previous)).unwrap();
    (
        content_hash(content),
        BundleAttachment {
            content: content.to_vec(),
            metadata,
        },
    )
}

pub(crate) fn core(
    external_id: &str,
    attachments: &[Hash],
    participants: Vec<PartyId>,
) -> ConsentCore {
    ConsentCore {
        external_id: external_id.into(),
        attachments: attachments.iter().copied().collect(),
        participants,
    }
}

pub(crate) fn record(
    external_id: &str,
    version: u32,
    attachments: &[Hash],
    participants: Vec<PartyId>,
) -> ConsentRecord {
    ConsentRecord {
        core: core(external_id, attachments, participants),
        record_id: Uuid::new_v4(),
        version,
    }
}

/// An open branch forked from `record`, proposing `attachments` as the
/// full successor set.
pub(crate) fn branch_for(
    record: &ConsentRecord,
    attachments: &[Hash],
    legal_entities: Vec<EntityUri>,
    participants: Vec<PartyId>,
) -> ConsentBranch {
    ConsentBranch {
        core: core(&record.core.external_id, attachments, participants),
        branch_id: Uuid::new_v4(),
        branch_point: record.identity(),
        legal_entities,
        signatures: Vec::new(),
        lifecycle: BranchLifecycle::Open,
        initiating_node: "node-a".into(),
        initiating_legal_entity: "urn:oid:2.16.840.1.113883.2.4.6.1:initiator".into(),
        branch_time: timestamp(),
        state_time: timestamp(),
        closing_reason: None,
        closing_comment: None,
    }
}

pub(crate) fn endorse(
    signing_key: &SigningKey,
    legal_entity: &EntityUri,
    content: &[u8],
) -> AttachmentSignature {
    AttachmentSignature {
        legal_entity: legal_entity.clone(),
        attachment: content_hash(content),
        public_key: signing_key.verifying_key().to_bytes(),
        signature: signing_key.sign(content).to_bytes(),
    }
}

pub(crate) fn empty_bundle(commands: Vec<ConsentCommand>) -> TransactionBundle {
    TransactionBundle {
        commands,
        consumed_records: Vec::new(),
        consumed_branches: Vec::new(),
        produced_records: Vec::new(),
        produced_branches: Vec::new(),
        attachments: BTreeMap::new(),
        signers: BTreeSet::new(),
    }
}

/// A ready-to-pass Add bundle: record v1 with no attachments, successor
/// v2, and an open branch carrying one new document for `entity(1)`.
/// Returns the bundle and the document content for further signing.
pub(crate) fn add_bundle(participants: Vec<PartyId>) -> (TransactionBundle, Vec<u8>) {
    let content = b"consent-document-1".to_vec();
    let (hash, bundle_attachment) = attachment(&content, &[entity(1)], None);

    let input = record("subject-1", 1, &[], participants.clone());
    let mut output = input.next_version();
    output.core.participants = participants.clone();

    let branch = branch_for(&input, &[hash], vec![entity(1)], participants.clone());

    let mut bundle = empty_bundle(vec![ConsentCommand::Add]);
    bundle.consumed_records.push(input);
    bundle.produced_records.push(output);
    bundle.produced_branches.push(branch);
    bundle.attachments.insert(hash, bundle_attachment);
    bundle.signers = participants.into_iter().collect();

    (bundle, content)
}

/// The attachment set of `bundle` as a sorted vector, for assertions.
pub(crate) fn bundle_hashes(bundle: &TransactionBundle) -> Vec<Hash> {
    bundle.attachments.keys().copied().collect()
}
