//! Lane detector orchestrating the classical single-image pipeline.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the CLI.
//! - `pipeline` – the [`LaneDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::{BlendParams, BlurParams, EdgeParams, LaneParams, OverlayParams};
pub use pipeline::{LaneDetection, LaneDetector};
