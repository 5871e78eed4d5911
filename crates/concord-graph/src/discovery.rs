//! Peer discovery
//!
//! Every instance scans the static graph description for processes whose
//! names carry the task-name prefix. The survivors, keyed by suffix in a
//! sorted map, are the peer set the election and the merge both run over.
//! Discovery copies specs out of the description and never mutates it.

use std::collections::BTreeMap;

use tracing::warn;

use concord_core::{ConcordError, ConcordResult, Suffix, TaskName};

use crate::{ProcessSpec, WorkflowGraph};

/// The sibling instances of one logical task, keyed by suffix.
///
/// Backed by a `BTreeMap` so every process iterates peers in the same
/// order - the entire basis of coordination-free agreement.
#[derive(Clone, Debug, Default)]
pub struct PeerSet {
    peers: BTreeMap<Suffix, ProcessSpec>,
}

impl PeerSet {
    pub fn new() -> Self {
        PeerSet::default()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// More than one instance means reconciliation is actually needed.
    pub fn is_contested(&self) -> bool {
        self.peers.len() > 1
    }

    pub fn contains(&self, suffix: &Suffix) -> bool {
        self.peers.contains_key(suffix)
    }

    pub fn get(&self, suffix: &Suffix) -> Option<&ProcessSpec> {
        self.peers.get(suffix)
    }

    /// Smallest suffix in the set, if any.
    pub fn first_suffix(&self) -> Option<&Suffix> {
        self.peers.keys().next()
    }

    /// Iterate peers in ascending suffix order.
    pub fn iter(&self) -> impl Iterator<Item = (&Suffix, &ProcessSpec)> {
        self.peers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Suffix, &mut ProcessSpec)> {
        self.peers.iter_mut()
    }

    fn insert(&mut self, suffix: Suffix, spec: ProcessSpec) -> Option<ProcessSpec> {
        self.peers.insert(suffix, spec)
    }
}

/// Discover all instances of `task` in the graph description.
///
/// A process named exactly like the task carries the empty suffix and is not
/// an instance; it is excluded from the peer set and never participates in
/// election or reconciliation.
///
/// A suffix collision (two processes reducing to the same suffix) keeps the
/// later entry and logs a warning; it is a latent assembly anomaly but not
/// fatal here. Use [`discover_strict`] to fail fast instead.
pub fn discover(graph: &WorkflowGraph, task: &TaskName) -> PeerSet {
    let mut peers = PeerSet::new();
    for process in &graph.processes {
        let Some(suffix) = task.suffix_of(&process.name) else {
            continue;
        };
        if suffix.is_empty() {
            continue;
        }
        if let Some(previous) = peers.insert(suffix.clone(), process.clone()) {
            warn!(
                suffix = %suffix,
                kept = %process.name,
                dropped = %previous.name,
                "two instances share one suffix; keeping the later declaration"
            );
        }
    }
    peers
}

/// Discover all instances of `task`, failing on any suffix collision.
///
/// For hosts that guarantee suffix uniqueness at graph-construction time and
/// want violations surfaced instead of silently absorbed.
pub fn discover_strict(graph: &WorkflowGraph, task: &TaskName) -> ConcordResult<PeerSet> {
    let mut peers = PeerSet::new();
    for process in &graph.processes {
        let Some(suffix) = task.suffix_of(&process.name) else {
            continue;
        };
        if suffix.is_empty() {
            continue;
        }
        if peers.insert(suffix.clone(), process.clone()).is_some() {
            return Err(ConcordError::DuplicateSuffix {
                suffix: suffix.as_str().to_string(),
            });
        }
    }
    Ok(peers)
}
