//! Parameter types configuring the lane pipeline stages.
//!
//! Defaults reproduce the reference configuration: 640×480 working
//! resolution, 7×7 Gaussian, Canny 60/100 with a 3×3 Sobel, Hough with
//! ρ = 10 px, θ = 1°, 10 votes, 5 px minimum length and gap, red 8 px lanes
//! blended as `1.0·lanes + 0.8·image`.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON config only
//! needs the fields it overrides.

use crate::blur::BorderMode;
use crate::edges::GradientNorm;
use crate::error::{LaneError, Result};
use crate::hough::HoughOptions;
use crate::lanes::ClassifierKind;
use crate::roi::RegionPolygon;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters for one pass of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Working width every input is resized to.
    pub width: usize,
    /// Working height every input is resized to.
    pub height: usize,
    /// Region of interest in fractional coordinates.
    pub region: RegionPolygon,
    pub blur: BlurParams,
    pub edges: EdgeParams,
    pub hough: HoughOptions,
    /// Strategy splitting segments into left and right groups.
    pub classifier: ClassifierKind,
    pub overlay: OverlayParams,
    pub blend: BlendParams,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            region: RegionPolygon::default(),
            blur: BlurParams::default(),
            edges: EdgeParams::default(),
            hough: HoughOptions::default(),
            classifier: ClassifierKind::default(),
            overlay: OverlayParams::default(),
            blend: BlendParams::default(),
        }
    }
}

impl LaneParams {
    /// Check every stage's parameters before any image is touched.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LaneError::invalid(
                "resize",
                "resolution",
                format!(
                    "working resolution must be positive, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        self.region.validate()?;
        self.blur.validate()?;
        self.edges.validate()?;
        self.hough.validate()?;
        self.overlay.validate()?;
        self.blend.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Odd Gaussian kernel size.
    pub kernel_size: usize,
    /// Standard deviation; `0` derives it from the kernel size.
    pub sigma: f64,
    pub border: BorderMode,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kernel_size: 7,
            sigma: 0.0,
            border: BorderMode::Reflect101,
        }
    }
}

impl BlurParams {
    pub fn validate(&self) -> Result<()> {
        crate::blur::GaussianFilter::new(self.kernel_size, self.sigma).map(|_| ())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Hysteresis low threshold (gradient magnitude units).
    pub low_threshold: f64,
    /// Hysteresis high threshold; swapped with `low_threshold` if smaller.
    pub high_threshold: f64,
    /// Sobel aperture: 3, 5 or 7.
    pub aperture: usize,
    pub norm: GradientNorm,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: 60.0,
            high_threshold: 100.0,
            aperture: 3,
            norm: GradientNorm::L1,
        }
    }
}

impl EdgeParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LaneError::invalid(
                    "edges",
                    name,
                    format!("threshold must be finite and non-negative, got {value}"),
                ));
            }
        }
        crate::edges::grad::sobel_kernels(self.aperture).map(|_| ())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayParams {
    /// RGB color of the drawn lanes.
    pub color: [u8; 3],
    /// Line thickness in pixels.
    pub thickness: u32,
    /// Upper end of the synthesized lanes as a fraction of the height.
    pub top_fraction: f64,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 8,
            top_fraction: 0.6,
        }
    }
}

impl OverlayParams {
    pub fn validate(&self) -> Result<()> {
        if self.thickness == 0 {
            return Err(LaneError::invalid(
                "overlay",
                "thickness",
                "line thickness must be at least 1",
            ));
        }
        if !(self.top_fraction.is_finite() && (0.0..=1.0).contains(&self.top_fraction)) {
            return Err(LaneError::invalid(
                "overlay",
                "top_fraction",
                format!("expected a value in [0, 1], got {}", self.top_fraction),
            ));
        }
        Ok(())
    }
}

/// Weights of `alpha·lanes + beta·image + gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.8,
            gamma: 0.0,
        }
    }
}

impl BlendParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() {
                return Err(LaneError::invalid(
                    "blend",
                    name,
                    format!("weight must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }
}
