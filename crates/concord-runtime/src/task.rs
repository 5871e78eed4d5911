//! The analysis task
//!
//! One instance of the logical task, as hosted by the dataflow runtime. At
//! initialization every instance independently runs discovery and election
//! over the static graph description; the leader absorbs peer options, the
//! rest zombify. Per-event entry points then gate on the resulting
//! configuration so zombies and analysis-less runs degrade to cheap no-ops
//! without special-casing the event loop.

use tracing::{debug, info, warn};

use concord_core::{ConcordError, ConcordResult, TaskConfig, TaskName};
use concord_graph::{discover, elect, ElectionResult, WorkflowGraph};
use concord_merge::{reconcile, MergeReport, OptionSet};

use crate::{
    analysis_options, default_config, keys, AnalysisRunner, AuxRecords, CollisionRecord,
    EventConverter, TrackRecord,
};

/// One instance of the analysis task.
pub struct AnalysisTask<C, A> {
    /// This process's full declared name.
    name: String,
    /// The common task-name prefix.
    task: TaskName,
    config: TaskConfig,
    options: OptionSet,
    converter: C,
    runner: A,
    election: Option<ElectionResult>,
    report: Option<MergeReport>,
    /// One-shot warning latches, one per entry point.
    warned_full: bool,
    warned_plain: bool,
}

impl<C: EventConverter, A: AnalysisRunner> AnalysisTask<C, A> {
    /// Create an instance with the standard catalog and defaults.
    pub fn new(
        task: TaskName,
        process_name: impl Into<String>,
        converter: C,
        runner: A,
    ) -> Self {
        AnalysisTask {
            name: process_name.into(),
            task,
            config: default_config(),
            options: analysis_options(),
            converter,
            runner,
            election: None,
            report: None,
            warned_full: false,
            warned_plain: false,
        }
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Pre-init configuration access, for the host to apply CLI overrides.
    pub fn config_mut(&mut self) -> &mut TaskConfig {
        &mut self.config
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn runner(&self) -> &A {
        &self.runner
    }

    /// Election outcome; `None` before `init` or when uncontested.
    pub fn election(&self) -> Option<&ElectionResult> {
        self.election.as_ref()
    }

    /// Merge counters; `None` unless this instance led a contested election.
    pub fn merge_report(&self) -> Option<&MergeReport> {
        self.report.as_ref()
    }

    pub fn is_zombie(&self) -> bool {
        self.election.as_ref().is_some_and(|e| !e.is_leader)
    }

    /// Initialize this instance against the static graph description.
    ///
    /// Runs exactly once, before any event flows. A reconciliation conflict
    /// is returned as an error so the host's process supervisor observes the
    /// failure; the instance must not process events after that.
    pub fn init(&mut self, graph: &WorkflowGraph) -> ConcordResult<()> {
        self.absorb_or_zombify(graph)?;

        self.converter.init()?;
        self.runner.init(&self.config)?;
        Ok(())
    }

    /// Discovery, election, and either leader-side absorption of peer
    /// options or zombification.
    fn absorb_or_zombify(&mut self, graph: &WorkflowGraph) -> ConcordResult<()> {
        let own = self
            .task
            .suffix_of(&self.name)
            .ok_or_else(|| ConcordError::NotAnInstance {
                name: self.name.clone(),
                prefix: self.task.as_str().to_string(),
            })?;

        let mut peers = discover(graph, &self.task);
        if !peers.is_contested() {
            // Nothing to reconcile; run in default, uncontested mode.
            debug!(name = %self.name, "no sibling instances found");
            self.election = Some(ElectionResult::uncontested(own));
            return Ok(());
        }

        let election = elect(&peers, &own);
        info!(
            suffix = %election.suffix,
            leader = election.is_leader,
            siblings = peers.len(),
            "elected among sibling instances"
        );

        if election.is_leader {
            let report = reconcile(&mut peers, &own, &mut self.config, &self.options)?;
            info!(
                peers = report.peers,
                applied = report.applied,
                ignored = report.ignored,
                "absorbed peer configurations"
            );
            self.report = Some(report);
        } else {
            self.zombify();
        }
        self.election = Some(election);
        Ok(())
    }

    /// Neutralize this instance: with no analyses configured, every
    /// subsequent event callback returns immediately. The instance stays in
    /// the graph and still initializes its collaborators, because removal is
    /// not possible after the graph is built.
    fn zombify(&mut self) {
        info!(name = %self.name, "not the leader; clearing analysis set");
        self.config.set(keys::ANALYSES, "");
    }

    /// Whether the analysis set is empty, warning once per entry point.
    fn skip_empty(&mut self, plain: bool) -> bool {
        if self.runner.analysis_count() > 0 {
            return false;
        }
        let warned = if plain {
            &mut self.warned_plain
        } else {
            &mut self.warned_full
        };
        if !*warned {
            warn!(name = %self.name, "no analysis registered; skipping events");
            *warned = true;
        }
        true
    }

    /// Full-mode entry point: primary record plus auxiliary metadata.
    ///
    /// Inert when plain mode is configured; the other entry point owns the
    /// event in that case, and handling it twice would double-count.
    pub fn process_full(
        &mut self,
        collision: &CollisionRecord,
        tracks: &[TrackRecord],
        aux: &AuxRecords,
    ) -> ConcordResult<()> {
        if self.config.flag(keys::NO_AUX) {
            return Ok(());
        }
        if self.skip_empty(false) {
            return Ok(());
        }

        self.converter.begin_event();
        self.converter.convert_auxiliary(aux);
        self.converter.convert_primary(collision, tracks);
        let event = self.converter.end_event();
        self.runner.process(&event)
    }

    /// Plain-mode entry point: primary record only.
    pub fn process_plain(
        &mut self,
        collision: &CollisionRecord,
        tracks: &[TrackRecord],
    ) -> ConcordResult<()> {
        if !self.config.flag(keys::NO_AUX) {
            return Ok(());
        }
        if self.skip_empty(true) {
            return Ok(());
        }

        self.converter.begin_event();
        self.converter.convert_primary(collision, tracks);
        let event = self.converter.end_event();
        self.runner.process(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertedEvent;

    /// Converter that counts calls and tags events with aux presence.
    #[derive(Default)]
    struct CountingConverter {
        inits: usize,
        begins: usize,
        aux_fed: usize,
        primaries: usize,
        current_tracks: usize,
        current_aux: bool,
        current_id: u64,
    }

    impl EventConverter for CountingConverter {
        fn init(&mut self) -> ConcordResult<()> {
            self.inits += 1;
            Ok(())
        }

        fn begin_event(&mut self) {
            self.begins += 1;
            self.current_aux = false;
            self.current_tracks = 0;
        }

        fn convert_auxiliary(&mut self, _aux: &AuxRecords) {
            self.aux_fed += 1;
            self.current_aux = true;
        }

        fn convert_primary(&mut self, collision: &CollisionRecord, tracks: &[TrackRecord]) {
            self.primaries += 1;
            self.current_id = collision.id;
            self.current_tracks = tracks.len();
        }

        fn end_event(&mut self) -> ConvertedEvent {
            ConvertedEvent {
                collision_id: self.current_id,
                track_count: self.current_tracks,
                has_aux: self.current_aux,
            }
        }
    }

    /// Runner whose analysis set comes from the configured `analyses` key.
    #[derive(Default)]
    struct CountingRunner {
        analyses: Vec<String>,
        processed: Vec<ConvertedEvent>,
    }

    impl AnalysisRunner for CountingRunner {
        fn init(&mut self, config: &TaskConfig) -> ConcordResult<()> {
            self.analyses = config
                .text(keys::ANALYSES)
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            Ok(())
        }

        fn analysis_count(&self) -> usize {
            self.analyses.len()
        }

        fn process(&mut self, event: &ConvertedEvent) -> ConcordResult<()> {
            self.processed.push(event.clone());
            Ok(())
        }
    }

    use concord_graph::ProcessSpec;

    fn instance(graph: &WorkflowGraph, name: &str) -> AnalysisTask<CountingConverter, CountingRunner> {
        let mut task = AnalysisTask::new(
            TaskName::new("rivet"),
            name,
            CountingConverter::default(),
            CountingRunner::default(),
        );
        // The host applies this process's own declared options before init.
        if let Some(spec) = graph.process(name) {
            for option in &spec.options {
                task.config_mut().set(option.name.clone(), option.default.clone());
            }
        }
        task
    }

    fn contested_graph() -> WorkflowGraph {
        WorkflowGraph::new()
            .with_process(ProcessSpec::new("rivet_0").with_option(keys::ANALYSES, "A"))
            .with_process(ProcessSpec::new("rivet_1").with_option(keys::ANALYSES, "B"))
    }

    #[test]
    fn test_leader_absorbs_and_processes() {
        let graph = contested_graph();
        let mut task = instance(&graph, "rivet_0");
        task.init(&graph).unwrap();

        assert!(!task.is_zombie());
        assert_eq!(task.config().text(keys::ANALYSES), "A,B");
        assert_eq!(task.merge_report().unwrap().applied, 1);

        task.process_full(
            &CollisionRecord { id: 7, ..Default::default() },
            &[TrackRecord::default()],
            &AuxRecords::default(),
        )
        .unwrap();
        assert_eq!(task.runner.processed.len(), 1);
        assert!(task.runner.processed[0].has_aux);
        assert_eq!(task.runner.processed[0].collision_id, 7);
    }

    #[test]
    fn test_zombie_is_inert_but_initializes() {
        let graph = contested_graph();
        let mut task = instance(&graph, "rivet_1");
        task.init(&graph).unwrap();

        assert!(task.is_zombie());
        assert_eq!(task.config().text(keys::ANALYSES), "");
        // Collaborators still initialized: the host contract holds.
        assert_eq!(task.converter.inits, 1);

        for id in 0..3 {
            task.process_full(
                &CollisionRecord { id, ..Default::default() },
                &[],
                &AuxRecords::default(),
            )
            .unwrap();
        }
        assert!(task.runner.processed.is_empty());
        assert_eq!(task.converter.begins, 0);
    }

    #[test]
    fn test_uncontested_instance_skips_reconciliation() {
        let graph = WorkflowGraph::new()
            .with_process(ProcessSpec::new("rivet_0").with_option(keys::ANALYSES, "A"))
            .with_process(ProcessSpec::new("reader"));
        let mut task = instance(&graph, "rivet_0");
        task.init(&graph).unwrap();

        assert!(task.election().unwrap().is_leader);
        assert!(task.merge_report().is_none());
        assert_eq!(task.config().text(keys::ANALYSES), "A");
    }

    #[test]
    fn test_conflict_surfaces_from_init() {
        let graph = WorkflowGraph::new()
            .with_process(
                ProcessSpec::new("rivet_0").with_option(keys::CROSS_SECTION, 10.0),
            )
            .with_process(
                ProcessSpec::new("rivet_1").with_option(keys::CROSS_SECTION, 12.0),
            );
        let mut task = instance(&graph, "rivet_0");
        let err = task.init(&graph).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_bare_named_process_neither_contests_nor_zombifies() {
        // A process named exactly "rivet" is not an instance: it stays out
        // of the peer set, so the one real instance is uncontested and both
        // keep their own analyses.
        let graph = WorkflowGraph::new()
            .with_process(ProcessSpec::new("rivet").with_option(keys::ANALYSES, "A"))
            .with_process(ProcessSpec::new("rivet_1").with_option(keys::ANALYSES, "B"));

        let mut bare = instance(&graph, "rivet");
        bare.init(&graph).unwrap();
        assert!(!bare.is_zombie());
        assert_eq!(bare.config().text(keys::ANALYSES), "A");

        let mut real = instance(&graph, "rivet_1");
        real.init(&graph).unwrap();
        assert!(!real.is_zombie());
        assert!(real.merge_report().is_none());
        assert_eq!(real.config().text(keys::ANALYSES), "B");
    }

    #[test]
    fn test_not_an_instance_is_an_error() {
        let graph = WorkflowGraph::new().with_process(ProcessSpec::new("reader"));
        let mut task = instance(&graph, "reader");
        let err = task.init(&graph).unwrap_err();
        assert!(matches!(err, ConcordError::NotAnInstance { .. }));
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let graph = WorkflowGraph::new()
            .with_process(ProcessSpec::new("rivet_0").with_option(keys::ANALYSES, "A"));
        let mut task = instance(&graph, "rivet_0");
        task.init(&graph).unwrap();

        // Full mode configured: the plain entry point must not consume.
        task.process_plain(&CollisionRecord::default(), &[]).unwrap();
        assert!(task.runner.processed.is_empty());

        task.config_mut().set(keys::NO_AUX, true);
        task.process_full(
            &CollisionRecord::default(),
            &[],
            &AuxRecords::default(),
        )
        .unwrap();
        assert!(task.runner.processed.is_empty());

        task.process_plain(&CollisionRecord::default(), &[]).unwrap();
        assert_eq!(task.runner.processed.len(), 1);
        assert!(!task.runner.processed[0].has_aux);
    }

    #[test]
    fn test_empty_analysis_warns_once_not_per_event() {
        let graph = WorkflowGraph::new().with_process(ProcessSpec::new("rivet_0"));
        let mut task = instance(&graph, "rivet_0");
        task.init(&graph).unwrap();

        for _ in 0..5 {
            task.process_full(
                &CollisionRecord::default(),
                &[],
                &AuxRecords::default(),
            )
            .unwrap();
        }
        assert!(task.warned_full);
        assert!(!task.warned_plain);
        // Converter never touched: the gate short-circuits before conversion.
        assert_eq!(task.converter.begins, 0);
    }
}
