use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Line segment produced by the Hough stage, endpoints in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Integer midpoint; truncates towards zero like a pixel cast.
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Image-space slope `dy/dx`, `None` for vertical segments.
    pub fn slope(&self) -> Option<f64> {
        let dx = (self.x2 - self.x1) as f64;
        if dx == 0.0 {
            return None;
        }
        Some((self.y2 - self.y1) as f64 / dx)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneSide {
    Left,
    Right,
}

impl fmt::Display for LaneSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneSide::Left => f.write_str("left"),
            LaneSide::Right => f.write_str("right"),
        }
    }
}

/// Line `y = slope * x + intercept` in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    /// Solve for `x` at row `y`. Infinite when the line is horizontal.
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}

/// Fitted lane boundary with its synthesized drawing endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneLine {
    pub side: LaneSide,
    pub fitted: FittedLine,
    /// Number of segment midpoints the fit was computed from.
    pub samples: usize,
    /// Endpoint on the bottom image row (`y = height`).
    pub bottom: [f64; 2],
    /// Endpoint on the upper row (`y = top_fraction * height`).
    pub top: [f64; 2],
}

impl LaneLine {
    /// Slope of the synthesized segment, equal to the fitted slope.
    pub fn segment_slope(&self) -> f64 {
        (self.top[1] - self.bottom[1]) / (self.top[0] - self.bottom[0])
    }
}
