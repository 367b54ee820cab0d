//! Line-segment extraction from a binary edge map.
//!
//! Implements the progressive probabilistic Hough transform: edge pixels are
//! visited in a seeded random order and vote in a (ρ, θ) accumulator. As
//! soon as one bin reaches the vote threshold, the corresponding line is
//! walked from the current pixel in both directions, bridging gaps up to
//! `max_line_gap`. Long enough walks become segments; their pixels leave the
//! edge set and retract their votes so later lines are not double counted.
//!
//! An empty result is valid and simply means no segment qualified.

mod probabilistic;
#[cfg(test)]
mod tests;

pub use probabilistic::detect_segments;

use crate::error::{LaneError, Result};
use serde::{Deserialize, Serialize};

/// Knobs for [`detect_segments`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta: f64,
    /// Minimum votes before a bin is walked.
    pub threshold: u32,
    /// Minimum horizontal or vertical extent of an accepted segment (px).
    pub min_line_length: f64,
    /// Largest run of missing pixels bridged within one segment (px).
    pub max_line_gap: f64,
    /// Stop after this many segments.
    pub max_lines: Option<usize>,
    /// Seed of the pixel visiting order.
    pub seed: u64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 10.0,
            theta: std::f64::consts::PI / 180.0,
            threshold: 10,
            min_line_length: 5.0,
            max_line_gap: 5.0,
            max_lines: None,
            seed: 0xFFFF_FFFF_FFFF_FFFF,
        }
    }
}

impl HoughOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(LaneError::invalid(
                "hough",
                "rho",
                format!("rho must be positive, got {}", self.rho),
            ));
        }
        if !(self.theta.is_finite() && self.theta > 0.0 && self.theta <= std::f64::consts::PI) {
            return Err(LaneError::invalid(
                "hough",
                "theta",
                format!("theta must be in (0, π], got {}", self.theta),
            ));
        }
        if self.threshold == 0 {
            return Err(LaneError::invalid(
                "hough",
                "threshold",
                "vote threshold must be positive",
            ));
        }
        for (name, value) in [
            ("min_line_length", self.min_line_length),
            ("max_line_gap", self.max_line_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LaneError::invalid(
                    "hough",
                    name,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        if self.max_lines == Some(0) {
            return Err(LaneError::invalid("hough", "max_lines", "cap must be at least 1"));
        }
        Ok(())
    }
}
