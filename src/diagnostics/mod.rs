//! Diagnostics returned alongside a detection.
//!
//! [`DetectionReport`] bundles the detection itself, a [`PipelineTrace`] with
//! every intermediate image, and a serializable [`LaneReport`] for tools.
//! [`stage_mosaic`] tiles the trace into one image for visual inspection.

pub mod mosaic;
pub mod report;
pub mod timing;
pub mod trace;

pub use mosaic::stage_mosaic;
pub use report::{InputDescriptor, LaneReport, SideReport};
pub use timing::{StageTiming, TimingBreakdown};
pub use trace::PipelineTrace;

use crate::detector::LaneDetection;

#[derive(Clone, Debug)]
pub struct DetectionReport {
    pub detection: LaneDetection,
    pub trace: PipelineTrace,
    pub report: LaneReport,
}
