//! End-to-end integration scenarios
//!
//! Each test plays through a whole initialization from the point of view of
//! every instance in the graph, then drives events through the survivors.

#[cfg(test)]
mod tests {
    use concord_core::{ConcordError, OptionValue, TaskName};
    use concord_graph::{discover_strict, WorkflowGraph};
    use concord_runtime::{keys, AuxRecords, CollisionRecord, TrackRecord};

    use crate::{sibling_graph, sibling_task, TASK_PREFIX};

    fn text(s: &str) -> OptionValue {
        OptionValue::text(s)
    }

    #[test]
    fn test_three_instances_one_survivor() {
        let graph = sibling_graph(&[
            ("_0", &[(keys::ANALYSES, text("ALICE_2021_I1891391"))]),
            ("_1", &[(keys::ANALYSES, text("ALICE_2016_I1507157"))]),
            ("_2", &[(keys::FINALIZE, OptionValue::Bool(true))]),
        ]);

        let mut tasks: Vec<_> = ["_0", "_1", "_2"]
            .iter()
            .map(|s| sibling_task(&graph, s))
            .collect();
        for task in &mut tasks {
            task.init(&graph).unwrap();
        }

        let leaders = tasks.iter().filter(|t| !t.is_zombie()).count();
        assert_eq!(leaders, 1);
        assert!(!tasks[0].is_zombie());

        // The leader's analysis set is the concatenation in suffix order,
        // and it adopted the sticky finalize flag from instance 2.
        let merged = tasks[0].config();
        assert_eq!(
            merged.text(keys::ANALYSES),
            "ALICE_2021_I1891391,ALICE_2016_I1507157"
        );
        assert!(merged.flag(keys::FINALIZE));

        // Drive one event through everyone; only the leader does work.
        let collision = CollisionRecord {
            id: 1,
            ..Default::default()
        };
        let tracks = vec![TrackRecord::default(), TrackRecord::default()];
        for task in &mut tasks {
            task.process_full(&collision, &tracks, &AuxRecords::default())
                .unwrap();
        }
        let processed: usize = tasks.iter().map(|t| t.runner().processed.len()).sum();
        assert_eq!(processed, 1);
        assert_eq!(tasks[0].runner().processed[0].track_count, 2);
    }

    #[test]
    fn test_every_instance_agrees_on_the_leader() {
        let graph = sibling_graph(&[("_a", &[]), ("_b", &[]), ("_c", &[])]);
        let mut verdicts = Vec::new();
        for suffix in ["_a", "_b", "_c"] {
            let mut task = sibling_task(&graph, suffix);
            task.init(&graph).unwrap();
            verdicts.push((suffix, !task.is_zombie()));
        }
        assert_eq!(
            verdicts,
            vec![("_a", true), ("_b", false), ("_c", false)]
        );
    }

    #[test]
    fn test_cross_section_conflict_kills_the_leader_only() {
        let graph = sibling_graph(&[
            ("_0", &[(keys::CROSS_SECTION, OptionValue::Number(10.0))]),
            ("_1", &[(keys::CROSS_SECTION, OptionValue::Number(12.0))]),
        ]);

        // The leader detects the conflict during its own merge.
        let mut leader = sibling_task(&graph, "_0");
        let err = leader.init(&graph).unwrap_err();
        assert!(err.is_conflict());

        // The zombie never reconciles and initializes cleanly; whether the
        // whole job dies is the supervisor's call.
        let mut zombie = sibling_task(&graph, "_1");
        zombie.init(&graph).unwrap();
        assert!(zombie.is_zombie());
    }

    #[test]
    fn test_close_cross_sections_reconcile() {
        let graph = sibling_graph(&[
            ("_0", &[(keys::CROSS_SECTION, OptionValue::Number(100.0))]),
            ("_1", &[(keys::CROSS_SECTION, OptionValue::Number(100.0009))]),
        ]);
        let mut leader = sibling_task(&graph, "_0");
        leader.init(&graph).unwrap();
        assert_eq!(leader.config().number(keys::CROSS_SECTION), 100.0009);
    }

    #[test]
    fn test_log_level_merges_to_most_verbose() {
        let graph = sibling_graph(&[
            ("_0", &[]),
            ("_1", &[(keys::LOG_LEVEL, text("warning"))]),
            ("_2", &[(keys::LOG_LEVEL, text("debug"))]),
            ("_3", &[(keys::LOG_LEVEL, text("fatal"))]),
        ]);
        let mut leader = sibling_task(&graph, "_0");
        leader.init(&graph).unwrap();
        assert_eq!(leader.config().text(keys::LOG_LEVEL), "debug");
    }

    #[test]
    fn test_paths_concatenate_with_colon() {
        let graph = sibling_graph(&[
            ("_0", &[(keys::ANALYSIS_PATHS, text("/opt/ana"))]),
            ("_1", &[(keys::ANALYSIS_PATHS, text("/usr/share/ana"))]),
        ]);
        let mut leader = sibling_task(&graph, "_0");
        leader.init(&graph).unwrap();
        assert_eq!(
            leader.config().text(keys::ANALYSIS_PATHS),
            "/opt/ana:/usr/share/ana"
        );
    }

    #[test]
    fn test_strict_discovery_reports_collisions() {
        let graph = sibling_graph(&[("_0", &[]), ("_0", &[])]);
        let err = discover_strict(&graph, &TaskName::new(TASK_PREFIX)).unwrap_err();
        assert!(matches!(err, ConcordError::DuplicateSuffix { .. }));
    }

    #[test]
    fn test_description_survives_publication() {
        // The host writes the description once; every process parses the
        // same bytes back into the same graph.
        let graph = sibling_graph(&[
            ("_0", &[(keys::ANALYSES, text("A")), (keys::CROSS_SECTION, OptionValue::Number(10.0))]),
            ("_1", &[(keys::FINALIZE, OptionValue::Bool(true))]),
        ]);
        let published = graph.to_json().unwrap();
        let reread = WorkflowGraph::from_json(&published).unwrap();
        assert_eq!(reread, graph);

        let mut task = sibling_task(&reread, "_0");
        task.init(&reread).unwrap();
        assert!(task.config().flag(keys::FINALIZE));
    }
}
