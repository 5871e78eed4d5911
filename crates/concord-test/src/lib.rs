//! Concord Test Harness - Scenario building and replay validation
//!
//! This crate provides:
//! - Graph fixtures for multi-instance scenarios
//! - Recording collaborator implementations
//! - Seeded replay fuzzing for election/merge determinism
//! - End-to-end integration tests

pub mod harness;
pub mod replay;
pub mod integration;

pub use harness::*;
pub use replay::*;
