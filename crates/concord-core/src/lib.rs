//! Concord Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout Concord:
//! - Identity types (TaskName, Suffix)
//! - Typed option values
//! - The per-process task configuration
//! - Log-level ranking
//! - Error types

pub mod ident;
pub mod value;
pub mod config;
pub mod level;
pub mod error;

pub use ident::*;
pub use value::*;
pub use config::*;
pub use level::*;
pub use error::*;
