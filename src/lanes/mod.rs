//! Lane boundary estimation from Hough segments.
//!
//! Segments are split into left and right groups by a [`LaneClassifier`],
//! each group's midpoints are fitted with ordinary least squares, and the
//! fitted lines are drawn as thick segments from the bottom row up to a
//! fixed fraction of the image height.

pub mod classify;
pub mod draw;
mod fitter;
pub mod regression;

pub use classify::{
    classify_segments, ClassifierKind, LaneClassifier, MidpointClassifier, SideSamples,
    SlopeClassifier,
};
pub use draw::draw_thick_line;
pub use fitter::{fit_lanes, render_lanes, LaneEstimate};
pub use regression::fit_line;
