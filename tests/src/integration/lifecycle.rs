//! # Consent Lifecycle Flows
//!
//! Drives whole transitions through the verifier the way orchestration
//! would: Genesis creates a record, Add/Update fork a branch, Sign
//! collects endorsements, and Merge or Close terminates the branch.

#[cfg(test)]
mod tests {
    use crate::support;
    use cc_04_transition_verification::{
        ConsentCommand, TransactionBundle, TransitionRejection, TransitionVerifier,
    };
    use ed25519_dalek::SigningKey;
    use shared_types::{BranchLifecycle, ConsentBranch, ConsentRecord, PartyId};

    /// Everything one Add produces: the bundle plus the states and
    /// content needed to keep driving the lifecycle forward.
    struct AddFlow {
        bundle: TransactionBundle,
        input: ConsentRecord,
        output: ConsentRecord,
        branch: ConsentBranch,
        content: Vec<u8>,
    }

    /// Fork a branch off `input`, adding one document declared for
    /// entities 1 and 2 and bringing `branch_participants` on board.
    fn add_flow(input: ConsentRecord, branch_participants: Vec<PartyId>) -> AddFlow {
        let entities = [support::entity(1), support::entity(2)];
        let content = b"consent-document-v1".to_vec();
        let (hash, bundle_attachment) = support::attachment(&content, &entities, None);

        let output = input.next_version();
        let branch = support::branch_for(
            &input,
            &[hash],
            entities.to_vec(),
            branch_participants.clone(),
        );

        let mut bundle = support::empty_bundle(vec![ConsentCommand::Add]);
        bundle.consumed_records.push(input.clone());
        bundle.produced_records.push(output.clone());
        bundle.produced_branches.push(branch.clone());
        bundle.attachments.insert(hash, bundle_attachment);
        bundle.signers = branch_participants.into_iter().collect();

        AddFlow {
            bundle,
            input,
            output,
            branch,
            content,
        }
    }

    /// A Sign bundle appending `endorsement` to `branch`.
    fn sign_bundle(
        flow: &AddFlow,
        branch: &ConsentBranch,
        signing_key: &SigningKey,
        entity_tag: u8,
    ) -> (TransactionBundle, ConsentBranch) {
        let mut signed = branch.clone();
        signed.signatures.push(support::endorse(
            signing_key,
            &support::entity(entity_tag),
            &flow.content,
        ));

        let mut bundle = support::empty_bundle(vec![ConsentCommand::Sign]);
        bundle.consumed_branches.push(branch.clone());
        bundle.produced_branches.push(signed.clone());
        bundle.attachments = flow.bundle.attachments.clone();
        bundle.signers = branch.core.participant_set();

        (bundle, signed)
    }

    /// A Merge bundle folding `branch` into `record`.
    fn merge_bundle(
        flow: &AddFlow,
        record: &ConsentRecord,
        branch: &ConsentBranch,
    ) -> (TransactionBundle, ConsentRecord) {
        let mut merged = record.next_version();
        merged.core.attachments = record
            .attachments()
            .union(branch.attachments())
            .copied()
            .collect();
        merged.core.participants = record
            .core
            .participant_set()
            .union(&branch.core.participant_set())
            .copied()
            .collect();

        let mut bundle = support::empty_bundle(vec![ConsentCommand::Merge]);
        bundle.consumed_records.push(record.clone());
        bundle.consumed_branches.push(branch.clone());
        bundle.produced_records.push(merged.clone());
        bundle.attachments = flow.bundle.attachments.clone();
        bundle.signers = merged.core.participant_set();

        (bundle, merged)
    }

    #[test]
    fn test_genesis_creates_version_one_with_no_attachments() {
        support::init_tracing();
        let verifier = TransitionVerifier::new();
        let (_, custodian) = support::keypair();

        let bundle = support::genesis_bundle("subject-1", vec![custodian]);
        assert!(verifier.verify(&bundle).is_ok());

        let created = &bundle.produced_records[0];
        assert_eq!(created.version, 1);
        assert!(created.attachments().is_empty());
    }

    #[test]
    fn test_add_forks_branch_and_steps_version() {
        let verifier = TransitionVerifier::new();
        let (_, custodian) = support::keypair();
        let (_, caregiver) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian]);
        let flow = add_flow(input, vec![custodian, caregiver]);

        assert!(verifier.verify(&flow.bundle).is_ok());
        assert_eq!(flow.output.version, flow.input.version + 1);
        assert_eq!(flow.output.attachments(), flow.input.attachments());
        assert_eq!(
            flow.bundle.attachment_set(),
            *flow.branch.attachments(),
        );
        assert!(flow.branch.signatures.is_empty());
    }

    #[test]
    fn test_add_with_undeclared_entities_rejected() {
        let verifier = TransitionVerifier::new();
        let (_, custodian) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian]);
        let mut flow = add_flow(input, vec![custodian]);
        flow.bundle.produced_branches[0].legal_entities.clear();

        assert_eq!(
            verifier.verify(&flow.bundle),
            Err(TransitionRejection::LegalEntityMismatch)
        );
    }

    #[test]
    fn test_signatures_accumulate_one_at_a_time() {
        let verifier = TransitionVerifier::new();
        let (custodian_key, custodian) = support::keypair();
        let (caregiver_key, caregiver) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian]);
        let flow = add_flow(input, vec![custodian, caregiver]);

        let (first, once_signed) = sign_bundle(&flow, &flow.branch, &custodian_key, 1);
        assert!(verifier.verify(&first).is_ok());
        assert_eq!(once_signed.signatures.len(), 1);

        let (second, twice_signed) = sign_bundle(&flow, &once_signed, &caregiver_key, 2);
        assert!(verifier.verify(&second).is_ok());
        assert_eq!(twice_signed.signatures.len(), 2);

        // The same entity endorsing the same document again is a
        // duplicate, not a third signature.
        let (replay, _) = sign_bundle(&flow, &twice_signed, &custodian_key, 1);
        assert!(matches!(
            verifier.verify(&replay),
            Err(TransitionRejection::DuplicateSignature { .. })
        ));
    }

    #[test]
    fn test_complete_branch_merges_into_union() {
        let verifier = TransitionVerifier::new();
        let (custodian_key, custodian) = support::keypair();
        let (caregiver_key, caregiver) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian, caregiver]);
        let flow = add_flow(input.clone(), vec![custodian, caregiver]);

        let (_, once_signed) = sign_bundle(&flow, &flow.branch, &custodian_key, 1);
        let (_, fully_signed) = sign_bundle(&flow, &once_signed, &caregiver_key, 2);

        let (bundle, merged) = merge_bundle(&flow, &flow.output, &fully_signed);
        assert!(verifier.verify(&bundle).is_ok());

        let expected: std::collections::BTreeSet<_> = input
            .attachments()
            .union(fully_signed.attachments())
            .copied()
            .collect();
        assert_eq!(merged.core.attachments, expected);
    }

    #[test]
    fn test_half_signed_branch_does_not_merge() {
        let verifier = TransitionVerifier::new();
        let (custodian_key, custodian) = support::keypair();
        let (_, caregiver) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian, caregiver]);
        let flow = add_flow(input, vec![custodian, caregiver]);

        let (_, once_signed) = sign_bundle(&flow, &flow.branch, &custodian_key, 1);
        let (bundle, _) = merge_bundle(&flow, &flow.output, &once_signed);

        assert_eq!(
            verifier.verify(&bundle),
            Err(TransitionRejection::IncompleteSignatures {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_full_lifecycle_genesis_to_merge() {
        support::init_tracing();
        let verifier = TransitionVerifier::new();
        let (custodian_key, custodian) = support::keypair();
        let (caregiver_key, caregiver) = support::keypair();

        // Genesis
        let genesis = support::genesis_bundle("subject-1", vec![custodian]);
        assert!(verifier.verify(&genesis).is_ok());
        let v1 = genesis.produced_records[0].clone();

        // Add: fork a branch bringing the caregiver on board.
        let flow = add_flow(v1, vec![custodian, caregiver]);
        assert!(verifier.verify(&flow.bundle).is_ok());

        // Sign: both parties endorse the document.
        let (first, once_signed) = sign_bundle(&flow, &flow.branch, &custodian_key, 1);
        assert!(verifier.verify(&first).is_ok());
        let (second, fully_signed) = sign_bundle(&flow, &once_signed, &caregiver_key, 2);
        assert!(verifier.verify(&second).is_ok());

        // Merge: fold the branch into version 3.
        let (merge, v3) = merge_bundle(&flow, &flow.output, &fully_signed);
        assert!(verifier.verify(&merge).is_ok());

        assert_eq!(v3.version, 3);
        assert_eq!(v3.attachments().len(), 1);
        assert_eq!(v3.core.participant_set().len(), 2);
        assert_eq!(v3.identity(), flow.input.identity());
    }

    #[test]
    fn test_closed_branch_is_terminal() {
        let verifier = TransitionVerifier::new();
        let (_, custodian) = support::keypair();
        let (_, caregiver) = support::keypair();

        let input = support::record("subject-1", 1, &[], vec![custodian]);
        let flow = add_flow(input, vec![custodian, caregiver]);

        // Close the branch.
        let mut closed = flow.branch.clone();
        closed.lifecycle = BranchLifecycle::Closed;
        closed.closing_reason = Some("superseded by a newer proposal".into());
        closed.closing_comment = Some("new branch opened with corrected period".into());

        let mut close = support::empty_bundle(vec![ConsentCommand::Close]);
        close.consumed_branches.push(flow.branch.clone());
        close.produced_branches.push(closed.clone());
        close.signers = flow.branch.core.participant_set();
        assert!(verifier.verify(&close).is_ok());

        // A closed branch can no longer be merged.
        let (mut merge, _) = merge_bundle(&flow, &flow.output, &closed);
        merge.consumed_branches[0] = closed;
        assert_eq!(
            verifier.verify(&merge),
            Err(TransitionRejection::BranchNotOpen)
        );
    }
}
