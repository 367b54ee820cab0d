//! JSON configuration of the `lane_lines` tool.
pub mod lane_lines;

pub use lane_lines::{load_config, LaneOutputConfig, LaneToolConfig};
