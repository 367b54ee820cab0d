#![doc = include_str!("../README.md")]

// Pipeline stages, in execution order.
pub mod blur;
pub mod color;
pub mod compose;
pub mod edges;
pub mod hough;
pub mod lanes;
pub mod roi;

// Orchestration, data model and support.
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{LaneDetection, LaneDetector, LaneParams};
pub use crate::diagnostics::{DetectionReport, LaneReport, PipelineTrace};
pub use crate::error::{LaneError, Result};
pub use crate::lanes::{ClassifierKind, LaneClassifier, LaneEstimate};
pub use crate::types::{FittedLine, LaneLine, LaneSide, LineSegment, Point};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_finder::prelude::*;
///
/// # fn main() -> lane_finder::Result<()> {
/// let img = ImageU8::rgb(640, 480);
/// let det = LaneDetector::new(LaneParams::default())?;
/// let out = det.process(&img)?;
/// println!("segments={} total_ms={:.3}", out.segments.len(), out.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{LaneDetector, LaneParams, LaneSide, Result};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::blur::gaussian_blur;
    pub use crate::color::{gray_to_rgb, rgb_to_gray};
    pub use crate::compose::add_weighted;
    pub use crate::edges::detect_edges;
    pub use crate::hough::{detect_segments, HoughOptions};
    pub use crate::image::resize_color;
    pub use crate::lanes::{fit_lanes, fit_line, render_lanes};
    pub use crate::roi::{fill_convex_polygon, mask_region, RegionPolygon};
}
