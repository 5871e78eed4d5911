//! Multi-Instance Merge Demo
//!
//! Plays one workflow assembly through from the point of view of every
//! instance: three copies of the same analysis task land in one graph, each
//! discovers the others in the static description, one wins the election and
//! absorbs the options of the rest, and the zombies go inert.
//!
//! Run with `RUST_LOG=debug` to watch the merge decisions.

use tracing_subscriber::EnvFilter;

use concord_core::OptionValue;
use concord_runtime::{keys, AuxRecords, CollisionRecord, TrackRecord};
use concord_test::{sibling_graph, sibling_task};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Concord Multi-Instance Merge Demo ===\n");

    // 1. The host runtime assembles one graph with three sibling instances.
    println!("1. Assembling the workflow description...");
    let graph = sibling_graph(&[
        (
            "_0",
            &[
                (keys::ANALYSES, OptionValue::text("ALICE_2021_I1891391")),
                (keys::CROSS_SECTION, OptionValue::Number(57.8)),
            ],
        ),
        (
            "_1",
            &[
                (keys::ANALYSES, OptionValue::text("ALICE_2016_I1507157")),
                (keys::LOG_LEVEL, OptionValue::text("debug")),
            ],
        ),
        (
            "_2",
            &[
                (keys::FINALIZE, OptionValue::Bool(true)),
                (keys::ANALYSIS_PATHS, OptionValue::text("/opt/analyses")),
            ],
        ),
    ]);
    for process in &graph.processes {
        println!("   process {:?} ({} options)", process.name, process.options.len());
    }

    // 2. Every instance initializes independently over the same description.
    println!("\n2. Initializing every instance independently...");
    let mut tasks = Vec::new();
    for suffix in ["_0", "_1", "_2"] {
        let mut task = sibling_task(&graph, suffix);
        match task.init(&graph) {
            Ok(()) => {
                let role = if task.is_zombie() { "zombie" } else { "leader" };
                println!("   rivet{suffix}: {role}");
            }
            Err(err) => {
                eprintln!("   rivet{suffix}: fatal configuration conflict: {err}");
                std::process::exit(1);
            }
        }
        tasks.push(task);
    }

    // 3. The leader's configuration is the conflict-checked merge.
    println!("\n3. Leader configuration after the merge:");
    let leader = &tasks[0];
    for key in [
        keys::ANALYSES,
        keys::ANALYSIS_PATHS,
        keys::CROSS_SECTION,
        keys::FINALIZE,
        keys::LOG_LEVEL,
    ] {
        println!("   {key} = {}", leader.config().get(key).unwrap());
    }
    if let Some(report) = leader.merge_report() {
        println!(
            "   ({} peers, {} applied, {} ignored)",
            report.peers, report.applied, report.ignored
        );
    }

    // 4. Events flow; zombies skip them without special-casing the loop.
    println!("\n4. Driving three events through all instances...");
    let tracks = vec![TrackRecord::default(); 12];
    for id in 0..3 {
        let collision = CollisionRecord {
            id,
            ..Default::default()
        };
        for task in &mut tasks {
            if let Err(err) = task.process_full(&collision, &tracks, &AuxRecords::default()) {
                eprintln!("   event {id}: {err}");
                std::process::exit(1);
            }
        }
    }
    for (task, suffix) in tasks.iter().zip(["_0", "_1", "_2"]) {
        println!(
            "   rivet{suffix}: processed {} events",
            task.runner().processed.len()
        );
    }

    println!("\nDone: one active instance, deterministic merge, inert siblings.");
}
