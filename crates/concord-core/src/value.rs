//! Typed option values
//!
//! Options declared in the static graph description carry a typed literal
//! fixed at graph-build time: boolean, string, or floating-point.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declared option value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    pub fn text(s: impl Into<String>) -> Self {
        OptionValue::Text(s.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Number(_) => "number",
            OptionValue::Text(_) => "text",
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}
