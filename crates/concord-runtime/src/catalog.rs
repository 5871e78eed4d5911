//! Option catalog for the analysis task
//!
//! The concrete key-to-policy bindings every instance of the task agrees on,
//! plus the per-process default configuration. The table is fixed at build
//! time; there is no runtime negotiation of policy.

use concord_core::{level_rank, TaskConfig};
use concord_merge::{MergePolicy, OptionSet, DEFAULT_ATOL, DEFAULT_RTOL};

/// Stable option keys of the analysis task.
pub mod keys {
    /// Generator cross-section, exact-checked; ≤ 0 means not set.
    pub const CROSS_SECTION: &str = "cross-section";
    /// Whether equivalent output objects merge statistically.
    pub const MERGE_EQUIVALENT: &str = "merge-equivalent";
    /// Recenter events to the nominal vertex before conversion.
    pub const RECENTER: &str = "recenter-events";
    /// Convert generated particles only.
    pub const ONLY_GENERATED: &str = "only-generated";
    /// Ignore beam particles when building events.
    pub const IGNORE_BEAMS: &str = "ignore-beams";
    /// Resolve analysis code relative to the working directory.
    pub const USE_PWD: &str = "use-pwd";
    /// Finalize analyses at end of run.
    pub const FINALIZE: &str = "finalize";
    /// Skip auxiliary records per event (plain mode).
    pub const NO_AUX: &str = "no-aux";
    /// Comma-separated analysis names to run.
    pub const ANALYSES: &str = "analyses";
    /// Colon-separated search paths for analysis code.
    pub const ANALYSIS_PATHS: &str = "analysis-paths";
    /// Comma-separated data files to preload.
    pub const PRELOADS: &str = "preloads";
    /// Comma-separated extra analysis sources.
    pub const SOURCES: &str = "sources";
    /// Comma-separated engine flags.
    pub const FLAGS: &str = "flags";
    /// Engine verbosity; most verbose declaration wins.
    pub const LOG_LEVEL: &str = "log-level";
}

/// The merge-policy table for the analysis task.
pub fn analysis_options() -> OptionSet {
    OptionSet::new()
        .with(
            keys::CROSS_SECTION,
            MergePolicy::ExactNumeric {
                rtol: DEFAULT_RTOL,
                atol: DEFAULT_ATOL,
            },
        )
        .with(keys::MERGE_EQUIVALENT, MergePolicy::ExactBoolean)
        .with(keys::RECENTER, MergePolicy::ExactBoolean)
        .with(keys::ONLY_GENERATED, MergePolicy::ExactBoolean)
        .with(keys::IGNORE_BEAMS, MergePolicy::StickyBoolean { default: false })
        .with(keys::USE_PWD, MergePolicy::StickyBoolean { default: false })
        .with(keys::FINALIZE, MergePolicy::StickyBoolean { default: false })
        .with(keys::NO_AUX, MergePolicy::StickyBoolean { default: false })
        .with(keys::ANALYSES, MergePolicy::ReplaceOnceString { sep: ',' })
        .with(keys::ANALYSIS_PATHS, MergePolicy::ConcatString { sep: ':' })
        .with(keys::PRELOADS, MergePolicy::ConcatString { sep: ',' })
        .with(keys::SOURCES, MergePolicy::ConcatString { sep: ',' })
        .with(keys::FLAGS, MergePolicy::ConcatString { sep: ',' })
        .with(keys::LOG_LEVEL, MergePolicy::MinRankedEnum { rank: level_rank })
}

/// Per-process defaults: numbers unset (0.0), flags off, strings empty.
pub fn default_config() -> TaskConfig {
    let mut config = TaskConfig::new();
    config.set(keys::CROSS_SECTION, 0.0);
    config.set(keys::MERGE_EQUIVALENT, false);
    config.set(keys::RECENTER, false);
    config.set(keys::ONLY_GENERATED, false);
    config.set(keys::IGNORE_BEAMS, false);
    config.set(keys::USE_PWD, false);
    config.set(keys::FINALIZE, false);
    config.set(keys::NO_AUX, false);
    config.set(keys::ANALYSES, "");
    config.set(keys::ANALYSIS_PATHS, "");
    config.set(keys::PRELOADS, "");
    config.set(keys::SOURCES, "");
    config.set(keys::FLAGS, "");
    config.set(keys::LOG_LEVEL, "");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_key_has_a_default() {
        let options = analysis_options();
        let config = default_config();
        for key in options.keys() {
            assert!(config.contains(key), "missing default for {key}");
        }
        assert_eq!(options.len(), config.len());
    }

    #[test]
    fn test_mode_flag_is_reconciled_sticky() {
        let options = analysis_options();
        assert!(matches!(
            options.policy(keys::NO_AUX),
            Some(MergePolicy::StickyBoolean { default: false })
        ));
    }

    #[test]
    fn test_analyses_is_the_only_drained_option() {
        let options = analysis_options();
        let drained: Vec<&str> = options
            .keys()
            .filter(|k| options.policy(k).map(MergePolicy::drains_peer).unwrap_or(false))
            .collect();
        assert_eq!(drained, vec![keys::ANALYSES]);
    }
}
