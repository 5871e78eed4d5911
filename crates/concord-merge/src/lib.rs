//! Concord Merge - Conflict-checked configuration reconciliation
//!
//! Run by the elected leader only: walk every peer's declared options, apply
//! the per-option merge policy, and either fold the value into the leader's
//! own configuration or fail hard on an irreconcilable disagreement.
//!
//! Policies are a closed tagged union selected from a static key-to-policy
//! table, so the reconcilable option set is exhaustively enumerable and
//! testable in isolation from discovery and election.

pub mod close;
pub mod policy;
pub mod optionset;
pub mod reconcile;

pub use close::*;
pub use policy::*;
pub use optionset::*;
pub use reconcile::*;
