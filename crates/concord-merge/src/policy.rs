//! Per-option merge policies
//!
//! Each reconcilable option carries one policy describing how a peer's
//! declared value folds into the leader's configuration. Exact policies can
//! fail hard; every other policy is total and only ever mutates in place.

use tracing::info;

use concord_core::{ConcordError, ConcordResult, OptionValue, TaskConfig};

use crate::is_close;

/// Maps a string value to a non-negative rank; negative means unranked.
pub type RankFn = fn(&str) -> i32;

/// What applying one peer option did to the leader's configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The leader's value was updated.
    Applied,
    /// The peer's value was a no-op (sentinel, empty, equal, or outranked).
    Ignored,
}

/// Merge policy for a single option key.
#[derive(Clone, Debug)]
pub enum MergePolicy {
    /// Peer value must be numerically close to the leader's; a value at or
    /// below zero is the "not set" sentinel and is skipped.
    ExactNumeric { rtol: f64, atol: f64 },
    /// Peer boolean must equal the leader's current value.
    ExactBoolean,
    /// A peer value differing from `default` overwrites the leader's value;
    /// last writer wins and no conflict is ever raised.
    StickyBoolean { default: bool },
    /// Non-empty peer strings append to the leader's value with `sep`, in
    /// peer-enumeration order.
    ConcatString { sep: char },
    /// Like `ConcatString`, but the peer's declared default is cleared after
    /// the merge so the host runtime cannot re-apply a consumed value.
    ReplaceOnceString { sep: char },
    /// Ranked peer values replace the leader's whenever their rank is lower,
    /// or whenever the leader has no rank yet.
    MinRankedEnum { rank: RankFn },
}

impl MergePolicy {
    /// Whether this policy drains the peer's declared default once applied.
    pub fn drains_peer(&self) -> bool {
        matches!(self, MergePolicy::ReplaceOnceString { .. })
    }

    /// Apply one peer-declared value for `key` against the leader's config.
    pub fn apply(
        &self,
        key: &str,
        declared: &OptionValue,
        config: &mut TaskConfig,
    ) -> ConcordResult<MergeOutcome> {
        match self {
            MergePolicy::ExactNumeric { rtol, atol } => {
                let theirs = expect_number(key, declared)?;
                if theirs <= 0.0 {
                    // Not-set sentinel: never a conflict, never an overwrite.
                    return Ok(MergeOutcome::Ignored);
                }
                let ours = config.number(key);
                if !is_close(theirs, ours, *rtol, *atol) {
                    return Err(ConcordError::NumericConflict {
                        key: key.to_string(),
                        ours,
                        theirs,
                    });
                }
                config.set(key, theirs);
                Ok(MergeOutcome::Applied)
            }
            MergePolicy::ExactBoolean => {
                let theirs = expect_bool(key, declared)?;
                let ours = config.flag(key);
                if theirs != ours {
                    return Err(ConcordError::BooleanConflict {
                        key: key.to_string(),
                        ours,
                        theirs,
                    });
                }
                Ok(MergeOutcome::Ignored)
            }
            MergePolicy::StickyBoolean { default } => {
                let theirs = expect_bool(key, declared)?;
                if theirs == *default {
                    return Ok(MergeOutcome::Ignored);
                }
                info!(key, value = theirs, "adopting peer setting");
                config.set(key, theirs);
                Ok(MergeOutcome::Applied)
            }
            MergePolicy::ConcatString { sep } | MergePolicy::ReplaceOnceString { sep } => {
                let theirs = expect_text(key, declared)?;
                if theirs.is_empty() {
                    return Ok(MergeOutcome::Ignored);
                }
                let mut merged = config.text(key).to_string();
                if !merged.is_empty() {
                    merged.push(*sep);
                }
                merged.push_str(theirs);
                info!(key, value = %merged, "appending peer setting");
                config.set(key, merged);
                Ok(MergeOutcome::Applied)
            }
            MergePolicy::MinRankedEnum { rank } => {
                let theirs = expect_text(key, declared)?;
                let their_rank = rank(theirs);
                if their_rank < 0 {
                    return Ok(MergeOutcome::Ignored);
                }
                let our_rank = rank(config.text(key));
                if our_rank < 0 || their_rank < our_rank {
                    info!(key, value = theirs, rank = their_rank, "lowering ranked setting");
                    config.set(key, theirs);
                    return Ok(MergeOutcome::Applied);
                }
                Ok(MergeOutcome::Ignored)
            }
        }
    }
}

fn expect_number(key: &str, value: &OptionValue) -> ConcordResult<f64> {
    value.as_number().ok_or(ConcordError::TypeMismatch {
        key: key.to_string(),
        expected: "number",
    })
}

fn expect_bool(key: &str, value: &OptionValue) -> ConcordResult<bool> {
    value.as_bool().ok_or(ConcordError::TypeMismatch {
        key: key.to_string(),
        expected: "bool",
    })
}

fn expect_text<'v>(key: &str, value: &'v OptionValue) -> ConcordResult<&'v str> {
    value.as_text().ok_or(ConcordError::TypeMismatch {
        key: key.to_string(),
        expected: "text",
    })
}
