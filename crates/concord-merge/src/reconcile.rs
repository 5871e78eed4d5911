//! Leader-side reconciliation pass
//!
//! The leader walks every other peer in ascending suffix order and folds
//! each declared option through its policy into its own configuration. The
//! pass runs exactly once per process lifetime, before any event flows, and
//! its input is immutable for the duration - so every process that runs it
//! over the same description reaches the same verdict.
//!
//! A peer cannot be reconfigured from here: peers live in other processes
//! and only in-process state is writable. Exact-policy disagreements must
//! therefore fail hard instead of being patched over.

use tracing::{debug, error};

use concord_core::{ConcordResult, OptionValue, Suffix, TaskConfig};
use concord_graph::PeerSet;

use crate::{MergeOutcome, OptionSet};

/// Counters for one reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Peers visited (self excluded).
    pub peers: u32,
    /// Options that had a registered policy and were evaluated.
    pub checked: u32,
    /// Options that updated the leader's configuration.
    pub applied: u32,
    /// Options that were evaluated but left the configuration untouched.
    pub ignored: u32,
}

/// Merge every peer's declared options into `config` under `options`.
///
/// Skips the peer whose suffix equals `own`. Unrecognized option keys are
/// not reconciled. Returns the first exact-policy conflict as an error, at
/// which point the process is expected to terminate.
///
/// `peers` is taken mutably only for the one-shot drain of
/// [`ReplaceOnceString`](crate::MergePolicy::ReplaceOnceString) defaults;
/// that mutation touches this process's owned copy of the description, never
/// another process.
pub fn reconcile(
    peers: &mut PeerSet,
    own: &Suffix,
    config: &mut TaskConfig,
    options: &OptionSet,
) -> ConcordResult<MergeReport> {
    let mut report = MergeReport::default();

    for (suffix, spec) in peers.iter_mut() {
        if suffix == own {
            continue;
        }
        debug!(peer = %suffix, own = %own, "absorbing peer options");
        report.peers += 1;

        for option in &mut spec.options {
            let Some(policy) = options.policy(&option.name) else {
                continue;
            };
            report.checked += 1;

            match policy.apply(&option.name, &option.default, config) {
                Ok(MergeOutcome::Applied) => report.applied += 1,
                Ok(MergeOutcome::Ignored) => report.ignored += 1,
                Err(err) => {
                    error!(peer = %suffix, key = %option.name, %err, "irreconcilable peer option");
                    return Err(err);
                }
            }

            if policy.drains_peer() {
                // Consumed: the host runtime must not re-apply this value.
                option.default = OptionValue::text("");
            }
        }
    }

    Ok(report)
}
