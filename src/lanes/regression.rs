//! Closed-form ordinary least squares on segment midpoints.
use crate::error::{LaneError, Result};
use crate::types::{FittedLine, LaneSide, Point};

/// Fit `y = m·x + b` through `points`, minimizing vertical residuals.
///
/// Fails with [`LaneError::InsufficientSamples`] for fewer than two points,
/// a vanishing denominator (all `x` equal), or a horizontal fit, since the
/// latter cannot be solved for `x` when synthesizing endpoints.
pub fn fit_line(points: &[Point], side: LaneSide) -> Result<FittedLine> {
    let insufficient = || LaneError::InsufficientSamples {
        side,
        samples: points.len(),
    };
    if points.len() < 2 {
        return Err(insufficient());
    }

    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for p in points {
        let (x, y) = (p.x as f64, p.y as f64);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }

    let denom = n * sxx - sx * sx;
    if denom == 0.0 || !denom.is_finite() {
        return Err(insufficient());
    }
    let slope = (n * sxy - sx * sy) / denom;
    let intercept = (sy * sxx - sx * sxy) / denom;
    if slope == 0.0 || !slope.is_finite() || !intercept.is_finite() {
        return Err(insufficient());
    }
    Ok(FittedLine { slope, intercept })
}
