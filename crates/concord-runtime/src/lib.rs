//! Concord Runtime - The analysis task
//!
//! Composes discovery, election, reconciliation, and zombification into the
//! initialization of one task instance, then gates the per-event entry
//! points on the reconciled configuration. The event-conversion and
//! analysis-execution collaborators are opaque services behind traits; this
//! crate only configures and calls them.

pub mod convert;
pub mod catalog;
pub mod task;

pub use convert::*;
pub use catalog::*;
pub use task::*;
