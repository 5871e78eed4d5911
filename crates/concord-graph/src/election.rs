//! Leader election
//!
//! The instance with the lexicographically smallest suffix leads; everyone
//! else becomes a zombie. Because the peer set is a sorted map built from a
//! description every process sees identically, each process computes the
//! same minimum independently - no messages, no tie-break beyond string
//! order.

use concord_core::Suffix;

use crate::PeerSet;

/// Outcome of an election, recomputed at every initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectionResult {
    /// Whether this instance is the single active one.
    pub is_leader: bool,
    /// This instance's own suffix.
    pub suffix: Suffix,
}

impl ElectionResult {
    /// Result for an instance that found no contest (at most one peer).
    pub fn uncontested(suffix: Suffix) -> Self {
        ElectionResult {
            is_leader: true,
            suffix,
        }
    }
}

/// Elect the leader among `peers` from this instance's point of view.
///
/// An empty peer set degenerates to uncontested leadership; the caller has
/// nothing to reconcile either way.
pub fn elect(peers: &PeerSet, own: &Suffix) -> ElectionResult {
    let is_leader = match peers.first_suffix() {
        Some(first) => first == own,
        None => true,
    };
    ElectionResult {
        is_leader,
        suffix: own.clone(),
    }
}
