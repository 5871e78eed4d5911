//! Error types for Concord

use thiserror::Error;

/// Core Concord errors
///
/// The conflict variants are fatal by design: two instances of the same
/// logical task disagreeing on an exact-checked setting means the workflow
/// was assembled incorrectly, and continuing would silently run the wrong
/// configuration.
#[derive(Error, Debug)]
pub enum ConcordError {
    // Reconciliation conflicts (fatal)
    #[error("inconsistent numeric setting {key:?}: {theirs} versus {ours}")]
    NumericConflict { key: String, ours: f64, theirs: f64 },

    #[error("inconsistent boolean setting {key:?}: {theirs} versus {ours}")]
    BooleanConflict {
        key: String,
        ours: bool,
        theirs: bool,
    },

    // Policy / configuration shape errors
    #[error("option {key:?} holds the wrong kind of value: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    // Discovery errors
    #[error("duplicate instance suffix {suffix:?} in workflow description")]
    DuplicateSuffix { suffix: String },

    #[error("process {name:?} is not an instance of task {prefix:?}")]
    NotAnInstance { name: String, prefix: String },

    // Graph description errors
    #[error("invalid workflow description: {0}")]
    InvalidGraph(String),

    // Collaborator errors
    #[error("event converter error: {0}")]
    Converter(String),

    #[error("analysis runner error: {0}")]
    Analysis(String),
}

impl ConcordError {
    /// Whether this error is a reconciliation conflict that must abort the
    /// process rather than be handled locally.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ConcordError::NumericConflict { .. } | ConcordError::BooleanConflict { .. }
        )
    }
}

/// Result type for Concord operations
pub type ConcordResult<T> = Result<T, ConcordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_are_flagged_fatal() {
        let err = ConcordError::NumericConflict {
            key: "cross-section".into(),
            ours: 10.0,
            theirs: 12.0,
        };
        assert!(err.is_conflict());

        let err = ConcordError::TypeMismatch {
            key: "analyses".into(),
            expected: "text",
        };
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_display_names_both_values() {
        let err = ConcordError::BooleanConflict {
            key: "merge-equivalent".into(),
            ours: true,
            theirs: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("merge-equivalent"));
        assert!(msg.contains("false versus true"));
    }
}
