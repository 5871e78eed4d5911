//! Concord Graph - Static workflow description and coordination-free consensus
//!
//! This crate holds the read-only description of the whole dataflow graph
//! (every process, its declared name, its declared option defaults), and the
//! two pure operations every instance runs over it at initialization:
//! - peer discovery: find all sibling instances of the same task
//! - leader election: deterministically designate exactly one active instance
//!
//! Both are total, deterministic functions of the description, which is
//! computed once upstream and visible identically to all processes. Identical
//! input plus identical computation yields identical output everywhere, so no
//! runtime channel between siblings is needed.

pub mod graph;
pub mod discovery;
pub mod election;

pub use graph::*;
pub use discovery::*;
pub use election::*;
