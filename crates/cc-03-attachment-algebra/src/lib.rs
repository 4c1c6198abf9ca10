//! # Attachment-Set Algebra (CC-03)
//!
//! Set comparisons between a record's attachment set, a branch's
//! attachment set, and the attachments physically present in a
//! transaction bundle; plus resolution of predecessor-reference chains,
//! which is what separates an *update* of an existing logical document
//! from a pure *add*.
//!
//! All operations are pure functions over borrowed sets and maps.

mod classify;
mod errors;
mod sets;

pub use classify::{classify_change, declared_entities, referenced_predecessors, ChangeKind};
pub use errors::AlgebraError;
pub use sets::{added_attachments, extends, same_set};
