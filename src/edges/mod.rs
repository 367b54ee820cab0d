//! Canny-style binary edge detection.
//!
//! Building blocks, in order:
//!
//! - Sobel gradients of configurable aperture (3, 5, 7) with replicated
//!   borders and an L1 or L2 magnitude.
//! - Non-maximum suppression along the quantized gradient direction.
//! - Hysteresis linking: strong pixels seed, 8-connected weak pixels extend.
//!
//! The output holds only `0` and `255`. Thresholds are expressed in the
//! magnitude units of the chosen norm on raw 8-bit intensities.

pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use grad::{sobel_gradients, GradientNorm, Grad};
pub use hysteresis::hysteresis;
pub use nms::run_nms;

use crate::error::{LaneError, Result};
use crate::image::{ImageF32, ImageU8};
use log::debug;

/// Detect edges in a smoothed 1-channel image.
///
/// `low > high` is accepted and the two are swapped.
pub fn detect_edges(
    src: &ImageU8,
    low_threshold: f64,
    high_threshold: f64,
    aperture: usize,
    norm: GradientNorm,
) -> Result<ImageU8> {
    src.expect_channels("edges", 1)?;
    for (name, value) in [
        ("low_threshold", low_threshold),
        ("high_threshold", high_threshold),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(LaneError::invalid(
                "edges",
                name,
                format!("threshold must be finite and non-negative, got {value}"),
            ));
        }
    }
    let (low, high) = if low_threshold > high_threshold {
        (high_threshold as f32, low_threshold as f32)
    } else {
        (low_threshold as f32, high_threshold as f32)
    };

    let intensity = ImageF32::from_u8(src);
    let grad = sobel_gradients(&intensity, aperture, norm)?;
    let thin = run_nms(&grad, low);
    let edges = hysteresis(&thin, low, high);
    debug!(
        "detect_edges w={} h={} low={} high={} aperture={} edge_px={}",
        src.w,
        src.h,
        low,
        high,
        aperture,
        edges.count_nonzero()
    );
    Ok(edges)
}
