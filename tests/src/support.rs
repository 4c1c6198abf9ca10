//! Builders shared by the integration scenarios.

use cc_01_consent_metadata::{
    ConsentMetadata, Domain, OrganisationKey, SymmetricKey, ValidityPeriod,
};
use cc_02_signature_verification::content_hash;
use cc_04_transition_verification::{BundleAttachment, ConsentCommand, TransactionBundle};
use chrono::{DateTime, TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use shared_types::{
    AttachmentSignature, BranchLifecycle, ConsentBranch, ConsentCore, ConsentRecord, EntityUri,
    Hash, PartyId, PublicKey,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Once;
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn keypair() -> (SigningKey, PublicKey) {
    let signing_key = SigningKey::generate(&mut rand::thread_rng());
    let public_key = signing_key.verifying_key().to_bytes();
    (signing_key, public_key)
}

pub fn entity(tag: u8) -> EntityUri {
    EntityUri::new(format!("urn:oid:2.16.840.1.113883.2.4.6.1:0000000{tag}"))
}

pub fn descriptor(entities: &[EntityUri], previous: Option<Hash>) -> ConsentMetadata {
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
pub fn attachment(
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

pub fn record(
    external_id: &str,
    version: u32,
    attachments: &[Hash],
    participants: Vec<PartyId>,
) -> ConsentRecord {
    ConsentRecord {
        core: ConsentCore {
            external_id: external_id.into(),
            attachments: attachments.iter().copied().collect(),
            participants,
        },
        record_id: Uuid::new_v4(),
        version,
    }
}

/// An open branch forked from `record`, proposing `attachments` as the
/// full successor set.
pub fn branch_for(
    record: &ConsentRecord,
    attachments: &[Hash],
    legal_entities: Vec<EntityUri>,
    participants: Vec<PartyId>,
) -> ConsentBranch {
    ConsentBranch {
        core: ConsentCore {
            external_id: record.core.external_id.clone(),
            attachments: attachments.iter().copied().collect(),
            participants,
        },
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

pub fn endorse(
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

pub fn empty_bundle(commands: Vec<ConsentCommand>) -> TransactionBundle {
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

/// A Genesis bundle for `participants`, all signing.
pub fn genesis_bundle(external_id: &str, participants: Vec<PartyId>) -> TransactionBundle {
    let mut bundle = empty_bundle(vec![ConsentCommand::Genesis]);
    bundle.signers = participants.iter().copied().collect();
    bundle
        .produced_records
        .push(record(external_id, 1, &[], participants));
    bundle
}
