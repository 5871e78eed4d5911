//! Per-process task configuration
//!
//! The configuration is the only state a reconciliation pass mutates, and
//! only the leader's own copy. Keys are stable option identifiers; values
//! are typed literals. Backed by a `BTreeMap` so iteration order is
//! deterministic everywhere it is observed.

use std::collections::BTreeMap;

use crate::OptionValue;

/// Mutable per-process configuration addressed by option key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskConfig {
    values: BTreeMap<String, OptionValue>,
}

impl TaskConfig {
    pub fn new() -> Self {
        TaskConfig::default()
    }

    /// Set a value, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Boolean value for `key`; missing or non-boolean reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    /// Numeric value for `key`; missing or non-numeric reads as `0.0`.
    pub fn number(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .and_then(OptionValue::as_number)
            .unwrap_or(0.0)
    }

    /// String value for `key`; missing or non-string reads as `""`.
    pub fn text(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(OptionValue::as_text)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
