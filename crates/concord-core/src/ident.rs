//! Identity types for Concord
//!
//! A task declared once in a workflow can be instantiated many times when
//! sub-configurations are concatenated. Each instance carries the common
//! task name as a literal prefix of its process name; the remainder is its
//! suffix, which serves as the instance's identity for election and merge
//! purposes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instance identity - the tail of a process name once the common task-name
/// prefix is removed.
///
/// The empty suffix marks a process named exactly like the task, which is
/// not an instance of it; discovery leaves such a process out of the peer
/// set.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suffix(String);

impl Suffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Suffix(suffix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Suffix {
    fn from(s: &str) -> Self {
        Suffix(s.to_string())
    }
}

impl fmt::Debug for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Suffix({:?})", self.0)
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The common task-name prefix shared by all instances of one logical task.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    pub fn new(name: impl Into<String>) -> Self {
        TaskName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strip this task name as a literal prefix of a process name.
    ///
    /// Returns `None` when the process name does not start with this task
    /// name. An exact match yields the empty suffix, which callers treat as
    /// "not an instance" when building peer sets.
    pub fn suffix_of(&self, process_name: &str) -> Option<Suffix> {
        process_name.strip_prefix(self.0.as_str()).map(Suffix::from)
    }
}

impl fmt::Debug for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskName({:?})", self.0)
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
