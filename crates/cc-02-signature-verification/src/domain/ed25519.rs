//! # Ed25519 Verification
//!
//! Pure domain logic for verifying attachment endorsements.
//!
//! ## Security Notes
//!
//! - Verification is a boolean predicate: malformed keys and malformed
//!   signatures are `false`, never a propagated error.
//! - Content addressing uses SHA-256 over the raw attachment bytes.

use super::entities::{BatchOutcome, ContentVerification};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use shared_types::{AttachmentSignature, Hash, PublicKey, SignatureBytes};

/// Verify an Ed25519 signature of `content` against `public_key`.
///
/// Every cryptographic failure mode (key not a valid curve point,
/// signature malformed, signature not matching) collapses to `false`.
pub fn verify_content_signature(
    public_key: &PublicKey,
    content: &[u8],
    signature: &SignatureBytes,
) -> bool {
    let verifying_key = match VerifyingKey::from_bytes(public_key) {
        Ok(key) => key,
        Err(_) => return false,
    };

    let sig = Signature::from_bytes(signature);

    verifying_key.verify(content, &sig).is_ok()
}

/// Verify an [`AttachmentSignature`] against the raw bytes backing the
/// attachment hash it names.
pub fn verify_attachment_signature(signature: &AttachmentSignature, content: &[u8]) -> bool {
    verify_content_signature(&signature.public_key, content, &signature.signature)
}

/// Verify a batch of independent endorsements in parallel.
pub fn batch_verify(items: &[ContentVerification<'_>]) -> BatchOutcome {
    use rayon::prelude::*;

    let verdicts: Vec<bool> = items
        .par_iter()
        .map(|item| verify_attachment_signature(item.signature, item.content))
        .collect();

    BatchOutcome::from_verdicts(&verdicts)
}

/// SHA-256 content address of attachment bytes.
pub fn content_hash(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
