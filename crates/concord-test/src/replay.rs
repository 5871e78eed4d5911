//! Replay fuzzing for coordination-free determinism
//!
//! The entire consensus argument rests on every process computing the same
//! answer from the same description. This fuzzer replays discovery, election,
//! and the leader's merge over randomly shuffled graph declarations and
//! checks that the outcome never depends on declaration order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use concord_core::{Suffix, TaskConfig, TaskName};
use concord_graph::{discover, elect, ProcessSpec, WorkflowGraph};
use concord_merge::reconcile;
use concord_runtime::{analysis_options, default_config, keys};

/// Replay configuration
#[derive(Clone, Debug)]
pub struct ReplayConfig {
    /// Sibling instances per round
    pub instance_count: usize,
    /// Shuffled replays per round
    pub shuffles: usize,
    /// Rounds to run
    pub rounds: usize,
    /// Random seed
    pub seed: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            instance_count: 5,
            shuffles: 8,
            rounds: 20,
            seed: 42,
        }
    }
}

impl ReplayConfig {
    /// Light configuration for quick checks.
    pub fn light() -> Self {
        ReplayConfig {
            instance_count: 3,
            shuffles: 4,
            rounds: 5,
            seed: 7,
        }
    }
}

/// Outcome of a replay run.
#[derive(Clone, Debug, Default)]
pub struct ReplayReport {
    pub rounds: usize,
    pub replays: usize,
    /// Rounds where every shuffle produced the same leader and merge.
    pub unanimous: usize,
}

impl ReplayReport {
    pub fn all_unanimous(&self) -> bool {
        self.unanimous == self.rounds
    }
}

/// One instance's complete verdict over a graph: who leads, and what the
/// leader's configuration became.
fn verdict(graph: &WorkflowGraph, own: &Suffix) -> (bool, TaskConfig) {
    let task = TaskName::new("rivet");
    let mut peers = discover(graph, &task);
    let election = elect(&peers, own);
    let mut config = default_config();
    if election.is_leader {
        reconcile(&mut peers, own, &mut config, &analysis_options())
            .expect("replay graphs carry no conflicting options");
    }
    (election.is_leader, config)
}

/// Run the replay fuzzer.
pub fn run_replay(config: &ReplayConfig) -> ReplayReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut report = ReplayReport {
        rounds: config.rounds,
        ..ReplayReport::default()
    };

    for _ in 0..config.rounds {
        let mut processes: Vec<ProcessSpec> = (0..config.instance_count)
            .map(|i| {
                ProcessSpec::new(format!("rivet_{i}"))
                    .with_option(keys::ANALYSES, format!("ANA_{i}"))
                    .with_option(keys::FINALIZE, rng.gen_bool(0.5))
                    .with_option(keys::PRELOADS, format!("file_{i}.dat"))
            })
            .collect();
        processes.push(ProcessSpec::new("aod-reader"));

        let suffixes: Vec<Suffix> = (0..config.instance_count)
            .map(|i| Suffix::new(format!("_{i}")))
            .collect();

        // Reference verdicts from the declaration order as written.
        let reference = WorkflowGraph {
            processes: processes.clone(),
        };
        let reference_verdicts: Vec<_> =
            suffixes.iter().map(|s| verdict(&reference, s)).collect();
        let leaders = reference_verdicts.iter().filter(|(lead, _)| *lead).count();

        let mut unanimous = leaders == 1;
        for _ in 0..config.shuffles {
            report.replays += 1;
            let mut shuffled = processes.clone();
            shuffled.shuffle(&mut rng);
            let graph = WorkflowGraph {
                processes: shuffled,
            };
            for (suffix, expected) in suffixes.iter().zip(&reference_verdicts) {
                if &verdict(&graph, suffix) != expected {
                    unanimous = false;
                }
            }
        }
        if unanimous {
            report.unanimous += 1;
        }
    }

    report
}
