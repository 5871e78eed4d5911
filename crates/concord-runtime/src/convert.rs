//! Collaborator seams and per-event record types
//!
//! The records mirror what the host runtime delivers per event: one primary
//! collision record with its tracks, plus - in full mode - the auxiliary
//! metadata (cross-section, parton-density info, heavy-ion header). The
//! converter turns them into an intermediate event representation; the
//! runner executes the configured analyses over it.

use concord_core::{ConcordResult, TaskConfig};

/// Primary per-event record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionRecord {
    pub id: u64,
    pub vertex_z: f64,
    pub weight: f64,
}

/// One final-state track of a collision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackRecord {
    pub pdg: i32,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

/// Generator cross-section metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrossSectionRecord {
    pub value_pb: f64,
    pub error_pb: f64,
}

/// Parton-density metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PdfRecord {
    pub id1: i32,
    pub id2: i32,
    pub x1: f64,
    pub x2: f64,
    pub scale: f64,
}

/// Heavy-ion collision metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeavyIonRecord {
    pub ncoll: i32,
    pub npart_proj: i32,
    pub npart_targ: i32,
    pub impact_parameter: f64,
}

/// Auxiliary records attached to an event in full mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuxRecords {
    pub cross_section: Option<CrossSectionRecord>,
    pub pdf: Option<PdfRecord>,
    pub heavy_ion: Option<HeavyIonRecord>,
}

/// The intermediate event representation handed to the analysis runner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertedEvent {
    pub collision_id: u64,
    pub track_count: usize,
    pub has_aux: bool,
}

/// Event-conversion collaborator.
///
/// One conversion unit per event: `begin_event`, one or more `convert_*`
/// calls, `end_event`. Implementations own the intermediate representation.
pub trait EventConverter {
    fn init(&mut self) -> ConcordResult<()>;
    fn begin_event(&mut self);
    /// Feed the auxiliary records (full mode only).
    fn convert_auxiliary(&mut self, aux: &AuxRecords);
    /// Feed the primary record and its tracks.
    fn convert_primary(&mut self, collision: &CollisionRecord, tracks: &[TrackRecord]);
    fn end_event(&mut self) -> ConvertedEvent;
}

/// Analysis-execution collaborator.
pub trait AnalysisRunner {
    /// Initialize from the (possibly reconciled, possibly zombified)
    /// configuration. The analysis set is read from `config` here.
    fn init(&mut self, config: &TaskConfig) -> ConcordResult<()>;
    /// Number of analyses configured; zero means this instance is a no-op.
    fn analysis_count(&self) -> usize;
    /// Run all configured analyses over one converted event.
    fn process(&mut self, event: &ConvertedEvent) -> ConcordResult<()>;
}
