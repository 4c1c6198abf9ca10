//! # Consent Metadata Subsystem (CC-01)
//!
//! Model, decode, and validation of the per-attachment metadata
//! descriptor: which domains a consent document covers, the key
//! material wrapped for each organisation, its validity period, and
//! the optional link to the attachment it supersedes.
//!
//! ## Architecture
//!
//! Everything in this crate is pure: `decode` is a stateless function
//! over descriptor bytes (there is no shared codec singleton), and
//! `validate` has no side effects. I/O, storage, and exchange of the
//! descriptor bytes are orchestration concerns.

mod decode;
mod errors;
mod model;
mod validate;

pub use decode::{decode, decode_validated};
pub use errors::MetadataError;
pub use model::{ConsentMetadata, Domain, OrganisationKey, SymmetricKey, ValidityPeriod};
