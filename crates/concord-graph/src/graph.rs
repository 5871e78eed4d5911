//! Static workflow description
//!
//! The host runtime assembles the full dataflow graph once, before any
//! process starts, and publishes the same description to every process.
//! Nothing in this module mutates after construction; discovery takes owned
//! copies of the process specs it keeps.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use concord_core::{ConcordError, ConcordResult, OptionValue};

/// A single declared option of a process, fixed at graph-build time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Stable option identifier, unique within a process.
    pub name: String,
    /// Declared default literal.
    pub default: OptionValue,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, default: impl Into<OptionValue>) -> Self {
        OptionSpec {
            name: name.into(),
            default: default.into(),
        }
    }
}

/// One process in the dataflow graph: its declared name and its ordered
/// option declarations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub name: String,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>) -> Self {
        ProcessSpec {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Builder-style option declaration.
    pub fn with_option(mut self, name: impl Into<String>, default: impl Into<OptionValue>) -> Self {
        self.options.push(OptionSpec::new(name, default));
        self
    }

    /// Look up a declared option by name.
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn option_mut(&mut self, name: &str) -> Option<&mut OptionSpec> {
        self.options.iter_mut().find(|o| o.name == name)
    }
}

/// The whole dataflow graph, as published by the host runtime.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub processes: Vec<ProcessSpec>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        WorkflowGraph::default()
    }

    pub fn with_process(mut self, process: ProcessSpec) -> Self {
        self.processes.push(process);
        self
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Find a process by its full declared name.
    pub fn process(&self, name: &str) -> Option<&ProcessSpec> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Parse a description from its JSON form.
    pub fn from_json(json: &str) -> ConcordResult<Self> {
        serde_json::from_str(json).map_err(|e| ConcordError::InvalidGraph(e.to_string()))
    }

    /// Load a description from the file the host runtime published.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConcordResult<Self> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| ConcordError::InvalidGraph(e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> ConcordResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConcordError::InvalidGraph(e.to_string()))
    }
}
