//! Ports layer: trait definitions for policies injected by orchestration

pub mod outbound;
