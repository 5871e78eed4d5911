//! Scenario harness
//!
//! Builders for multi-instance workflow graphs and recording collaborators
//! that expose exactly what the task fed them.

use concord_core::{ConcordResult, OptionValue, TaskConfig};
use concord_graph::{ProcessSpec, WorkflowGraph};
use concord_runtime::{
    keys, AnalysisRunner, AnalysisTask, AuxRecords, CollisionRecord, ConvertedEvent,
    EventConverter, TrackRecord,
};

/// Default task prefix used by the fixtures.
pub const TASK_PREFIX: &str = "rivet";

/// Build a graph of sibling instances, one per `(suffix, options)` entry,
/// surrounded by two unrelated processes so discovery has to filter.
pub fn sibling_graph(entries: &[(&str, &[(&str, OptionValue)])]) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new().with_process(ProcessSpec::new("aod-reader"));
    for (suffix, options) in entries {
        let mut spec = ProcessSpec::new(format!("{TASK_PREFIX}{suffix}"));
        for (key, value) in *options {
            spec = spec.with_option(*key, value.clone());
        }
        graph = graph.with_process(spec);
    }
    graph.with_process(ProcessSpec::new("histogram-writer"))
}

/// Build a ready-to-init task instance for `suffix`, seeding its config with
/// its own declared options the way the host runtime would.
pub fn sibling_task(
    graph: &WorkflowGraph,
    suffix: &str,
) -> AnalysisTask<RecordingConverter, RecordingRunner> {
    let name = format!("{TASK_PREFIX}{suffix}");
    let mut task = AnalysisTask::new(
        concord_core::TaskName::new(TASK_PREFIX),
        name.clone(),
        RecordingConverter::default(),
        RecordingRunner::default(),
    );
    if let Some(spec) = graph.process(&name) {
        for option in &spec.options {
            task.config_mut()
                .set(option.name.clone(), option.default.clone());
        }
    }
    task
}

/// Converter that records conversion-unit traffic.
#[derive(Debug, Default)]
pub struct RecordingConverter {
    pub inits: usize,
    pub begins: usize,
    pub ends: usize,
    pub aux_fed: usize,
    pub primaries_fed: usize,
    current: ConvertedEvent,
}

impl EventConverter for RecordingConverter {
    fn init(&mut self) -> ConcordResult<()> {
        self.inits += 1;
        Ok(())
    }

    fn begin_event(&mut self) {
        self.begins += 1;
        self.current = ConvertedEvent::default();
    }

    fn convert_auxiliary(&mut self, _aux: &AuxRecords) {
        self.aux_fed += 1;
        self.current.has_aux = true;
    }

    fn convert_primary(&mut self, collision: &CollisionRecord, tracks: &[TrackRecord]) {
        self.primaries_fed += 1;
        self.current.collision_id = collision.id;
        self.current.track_count = tracks.len();
    }

    fn end_event(&mut self) -> ConvertedEvent {
        self.ends += 1;
        self.current.clone()
    }
}

/// Runner that derives its analysis set from the configured `analyses` key
/// and records every event it is asked to process.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub analyses: Vec<String>,
    pub processed: Vec<ConvertedEvent>,
}

impl AnalysisRunner for RecordingRunner {
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
