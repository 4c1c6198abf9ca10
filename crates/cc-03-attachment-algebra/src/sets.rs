//! # Set Comparisons
//!
//! The handful of set relations the command rules lean on. Order never
//! matters; equality is same cardinality and same members.

use shared_types::Hash;
use std::collections::BTreeSet;

/// Same cardinality and same members.
pub fn same_set(left: &BTreeSet<Hash>, right: &BTreeSet<Hash>) -> bool {
    left == right
}

/// True if `next` contains every attachment of `prior`.
pub fn extends(prior: &BTreeSet<Hash>, next: &BTreeSet<Hash>) -> bool {
    next.is_superset(prior)
}

/// The attachments present in `next` but not in `prior`.
pub fn added_attachments(prior: &BTreeSet<Hash>, next: &BTreeSet<Hash>) -> BTreeSet<Hash> {
    next.difference(prior).copied().collect()
}
