//! # Signature Verification Subsystem (CC-02)
//!
//! Provides cryptographic verification of attachment endorsements for
//! Consent-Chain.
//!
//! ## Architecture
//!
//! The whole crate is domain logic: pure functions over borrowed
//! bytes, no I/O, no shared state. Verification is a boolean
//! predicate; a malformed key or signature is simply an invalid
//! endorsement, never a crash.
//!
//! ## Security Notes
//!
//! - Signatures are verified over the **raw content bytes** backing an
//!   attachment hash, not over the hash itself.
//! - Batches fan out over rayon; every item is independent and
//!   read-only, so results are deterministic regardless of scheduling.

pub mod domain;

// Re-export public API
pub use domain::ed25519::{
    batch_verify, content_hash, verify_attachment_signature, verify_content_signature,
};
pub use domain::entities::{BatchOutcome, ContentVerification};
