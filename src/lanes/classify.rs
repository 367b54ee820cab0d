//! Left/right assignment of Hough segments.
use crate::types::{LaneSide, LineSegment, Point};
use serde::{Deserialize, Serialize};

/// Decides which lane boundary a segment belongs to.
pub trait LaneClassifier: Send + Sync {
    fn classify(&self, segment: &LineSegment, width: usize, height: usize) -> LaneSide;

    fn name(&self) -> &'static str;
}

/// Splits on the segment midpoint: `x < width / 2` is left, everything else
/// (including the centre column) is right.
#[derive(Clone, Copy, Debug, Default)]
pub struct MidpointClassifier;

impl MidpointClassifier {
    #[inline]
    fn side_of(point: Point, width: usize) -> LaneSide {
        if (point.x as f64) < width as f64 * 0.5 {
            LaneSide::Left
        } else {
            LaneSide::Right
        }
    }
}

impl LaneClassifier for MidpointClassifier {
    fn classify(&self, segment: &LineSegment, width: usize, _height: usize) -> LaneSide {
        Self::side_of(segment.midpoint(), width)
    }

    fn name(&self) -> &'static str {
        "midpoint"
    }
}

/// Splits on the sign of the image-space slope. With `y` growing downwards
/// the left boundary rises to the right, so its slope is negative.
/// Horizontal and vertical segments fall back to [`MidpointClassifier`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SlopeClassifier;

impl LaneClassifier for SlopeClassifier {
    fn classify(&self, segment: &LineSegment, width: usize, _height: usize) -> LaneSide {
        match segment.slope() {
            Some(m) if m < 0.0 => LaneSide::Left,
            Some(m) if m > 0.0 => LaneSide::Right,
            _ => MidpointClassifier::side_of(segment.midpoint(), width),
        }
    }

    fn name(&self) -> &'static str {
        "slope"
    }
}

/// Serializable selector for the built-in classifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    Midpoint,
    Slope,
}

impl ClassifierKind {
    pub fn build(self) -> Box<dyn LaneClassifier> {
        match self {
            ClassifierKind::Midpoint => Box::new(MidpointClassifier),
            ClassifierKind::Slope => Box::new(SlopeClassifier),
        }
    }
}

/// Segment midpoints grouped by side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SideSamples {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl SideSamples {
    pub fn get(&self, side: LaneSide) -> &[Point] {
        match side {
            LaneSide::Left => &self.left,
            LaneSide::Right => &self.right,
        }
    }
}

pub fn classify_segments(
    segments: &[LineSegment],
    width: usize,
    height: usize,
    classifier: &dyn LaneClassifier,
) -> SideSamples {
    let mut samples = SideSamples::default();
    for seg in segments {
        let mid = seg.midpoint();
        match classifier.classify(seg, width, height) {
            LaneSide::Left => samples.left.push(mid),
            LaneSide::Right => samples.right.push(mid),
        }
    }
    samples
}
