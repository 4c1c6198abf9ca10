//! Cross-crate integration scenarios

mod lifecycle;
