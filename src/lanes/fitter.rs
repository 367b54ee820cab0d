use super::classify::{classify_segments, LaneClassifier};
use super::draw::draw_thick_line;
use super::regression::fit_line;
use crate::error::{LaneError, Result};
use crate::image::ImageU8;
use crate::types::{LaneLine, LaneSide, LineSegment};
use log::{debug, warn};

/// Outcome of fitting both lane boundaries. Each side fails independently.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneEstimate {
    pub left: Result<LaneLine>,
    pub right: Result<LaneLine>,
}

impl LaneEstimate {
    pub fn side(&self, side: LaneSide) -> &Result<LaneLine> {
        match side {
            LaneSide::Left => &self.left,
            LaneSide::Right => &self.right,
        }
    }

    /// Successfully fitted lines, left first.
    pub fn lines(&self) -> impl Iterator<Item = &LaneLine> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(|r| r.as_ref().ok())
    }
}

/// Classify `segments`, fit each side and synthesize its drawing segment from
/// the bottom row (`y = height`) up to `y = top_fraction · height`.
pub fn fit_lanes(
    segments: &[LineSegment],
    width: usize,
    height: usize,
    classifier: &dyn LaneClassifier,
    top_fraction: f64,
) -> LaneEstimate {
    let groups = classify_segments(segments, width, height, classifier);
    let y_bottom = height as f64;
    let y_top = top_fraction * height as f64;

    let fit_side = |side: LaneSide| -> Result<LaneLine> {
        let points = groups.get(side);
        let fitted = fit_line(points, side)?;
        Ok(LaneLine {
            side,
            fitted,
            samples: points.len(),
            bottom: [fitted.x_at(y_bottom), y_bottom],
            top: [fitted.x_at(y_top), y_top],
        })
    };

    let estimate = LaneEstimate {
        left: fit_side(LaneSide::Left),
        right: fit_side(LaneSide::Right),
    };
    for side in [LaneSide::Left, LaneSide::Right] {
        match estimate.side(side) {
            Ok(line) => debug!(
                "fit_lanes side={} classifier={} samples={} slope={:.4} intercept={:.2}",
                side,
                classifier.name(),
                line.samples,
                line.fitted.slope,
                line.fitted.intercept
            ),
            Err(err) => warn!("fit_lanes skipping {side} lane: {err}"),
        }
    }
    estimate
}

/// Draw the fitted lines onto a new black RGB image.
pub fn render_lanes(
    estimate: &LaneEstimate,
    width: usize,
    height: usize,
    color: [u8; 3],
    thickness: u32,
) -> Result<ImageU8> {
    if width == 0 || height == 0 {
        return Err(LaneError::invalid(
            "overlay",
            "resolution",
            format!("cannot draw onto a {width}x{height} image"),
        ));
    }
    let mut overlay = ImageU8::rgb(width, height);
    for line in estimate.lines() {
        draw_thick_line(&mut overlay, line.bottom, line.top, color, thickness)?;
    }
    Ok(overlay)
}
