//! The option set - which keys reconcile, and how
//!
//! A static mapping from option key to merge policy, fixed at build time and
//! identical in every process. Options absent from the table are simply not
//! reconciled.

use std::collections::BTreeMap;

use crate::MergePolicy;

/// Key-to-policy table for one logical task.
#[derive(Clone, Debug, Default)]
pub struct OptionSet {
    policies: BTreeMap<String, MergePolicy>,
}

impl OptionSet {
    pub fn new() -> Self {
        OptionSet::default()
    }

    /// Builder-style policy registration.
    pub fn with(mut self, key: impl Into<String>, policy: MergePolicy) -> Self {
        self.policies.insert(key.into(), policy);
        self
    }

    /// Policy for `key`, if the key is reconcilable.
    pub fn policy(&self, key: &str) -> Option<&MergePolicy> {
        self.policies.get(key)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Iterate keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }
}
