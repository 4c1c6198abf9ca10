//! # Transition Verification Subsystem (CC-04)
//!
//! The core state machine of Consent-Chain: six command kinds, each a
//! distinct rule set over (consumed records, produced records,
//! attachments, signer keys). A transaction bundle declares its intent
//! as one command (Add and Update may co-occur for a branch carrying
//! both new and superseding attachments); the verifier dispatches to
//! the declared rule sets and returns accept or a named rejection.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure validation logic, no I/O
//! - **Ports Layer** (`ports/`): The duplicate-consent policy hook
//! - **Service Layer** (`service.rs`): Entry point wiring domain logic
//!   to the hook, with tracing
//!
//! ## Failure Policy
//!
//! The first violated invariant short-circuits verification and returns
//! a named [`TransitionRejection`]; there is no partial acceptance and
//! no retry inside the core.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::bundle::{BundleAttachment, TransactionBundle};
pub use domain::commands::{check_command_combination, ConsentCommand};
pub use domain::rejection::TransitionRejection;
pub use domain::{
    verify_add, verify_close, verify_genesis, verify_merge, verify_sign, verify_update,
};
pub use ports::outbound::DuplicateConsentCheck;
pub use service::TransitionVerifier;
