use super::HoughOptions;
use crate::error::Result;
use crate::image::ImageU8;
use crate::types::{LineSegment, Point};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-point fraction bits used when stepping along a line.
const SHIFT: u32 = 16;

struct Accumulator {
    num_rho: usize,
    num_angle: usize,
    /// Interleaved `cos θ / ρ`, `sin θ / ρ` per angle bin.
    trig: Vec<f32>,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, rho: f64, theta: f64) -> Self {
        let num_angle = ((std::f64::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f64 / rho).round() as usize).max(1);
        let irho = 1.0 / rho as f32;
        let mut trig = Vec::with_capacity(num_angle * 2);
        for n in 0..num_angle {
            let angle = n as f64 * theta;
            trig.push(angle.cos() as f32 * irho);
            trig.push(angle.sin() as f32 * irho);
        }
        Self {
            num_rho,
            num_angle,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn rho_bin(&self, n: usize, x: i32, y: i32) -> usize {
        let r = (x as f32 * self.trig[n * 2] + y as f32 * self.trig[n * 2 + 1]).round() as isize;
        (r + (self.num_rho as isize - 1) / 2).clamp(0, self.num_rho as isize - 1) as usize
    }

    /// Add one vote per angle, returning the strongest bin `(votes, angle)`.
    fn vote(&mut self, x: i32, y: i32) -> (i32, usize) {
        let mut best = (i32::MIN, 0usize);
        for n in 0..self.num_angle {
            let idx = n * self.num_rho + self.rho_bin(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.0 {
                best = (self.votes[idx], n);
            }
        }
        best
    }

    fn retract(&mut self, x: i32, y: i32) {
        for n in 0..self.num_angle {
            let idx = n * self.num_rho + self.rho_bin(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Fixed-point walker along the line through a seed pixel.
///
/// Coordinates are `i64` so long walks cannot overflow the `SHIFT`-scaled
/// minor axis.
#[derive(Clone, Copy)]
struct LineWalk {
    x0: i64,
    y0: i64,
    dx0: i64,
    dy0: i64,
    /// Step one pixel along x (true) or along y (false).
    x_major: bool,
}

impl LineWalk {
    fn new(seed: Point, a: f32, b: f32) -> Self {
        let (sx, sy) = (seed.x as i64, seed.y as i64);
        let scale = (1i64 << SHIFT) as f32;
        if a.abs() > b.abs() {
            Self {
                x0: sx,
                y0: (sy << SHIFT) + (1i64 << (SHIFT - 1)),
                dx0: if a > 0.0 { 1 } else { -1 },
                dy0: (b * scale / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (sx << SHIFT) + (1i64 << (SHIFT - 1)),
                y0: sy,
                dx0: (a * scale / b.abs()).round() as i64,
                dy0: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Pixel positions visited in direction `k` (0 forward, 1 backward).
    fn pixels(self, k: usize) -> impl Iterator<Item = Point> {
        let sign = if k == 0 { 1 } else { -1 };
        let (dx, dy) = (self.dx0 * sign, self.dy0 * sign);
        let x_major = self.x_major;
        (0i64..).map(move |step| {
            let x = self.x0 + step * dx;
            let y = self.y0 + step * dy;
            let (px, py) = if x_major {
                (x, y >> SHIFT)
            } else {
                (x >> SHIFT, y)
            };
            Point::new(
                px.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                py.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            )
        })
    }
}

/// Extract line segments from a binary (non-zero = edge) single-channel image.
pub fn detect_segments(edges: &ImageU8, options: &HoughOptions) -> Result<Vec<LineSegment>> {
    options.validate()?;
    edges.expect_channels("hough", 1)?;

    let (width, height) = (edges.w, edges.h);
    let (w, h) = (width as i32, height as i32);
    let line_length = options.min_line_length.round() as i32;
    let line_gap = options.max_line_gap.round() as i32;
    let threshold = options.threshold as i32;
    let max_lines = options.max_lines.unwrap_or(usize::MAX);

    let mut acc = Accumulator::new(width, height, options.rho, options.theta);
    let mut mask: Vec<bool> = edges.data.iter().map(|&v| v != 0).collect();
    let mut voted = vec![false; mask.len()];
    let mut pending: Vec<Point> = mask
        .iter()
        .enumerate()
        .filter(|&(_, &on)| on)
        .map(|(i, _)| Point::new((i % width) as i32, (i / width) as i32))
        .collect();
    let edge_pixels = pending.len();
    let in_bounds = |p: Point| p.x >= 0 && p.x < w && p.y >= 0 && p.y < h;
    let at = |p: Point| p.y as usize * width + p.x as usize;

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut segments = Vec::new();

    while !pending.is_empty() {
        let pick = rng.gen_range(0..pending.len());
        let point = pending.swap_remove(pick);

        // Already consumed by an earlier segment.
        if !mask[at(point)] {
            continue;
        }

        let (max_votes, max_n) = acc.vote(point.x, point.y);
        voted[at(point)] = true;
        if max_votes < threshold {
            continue;
        }

        let a = -acc.trig[max_n * 2 + 1];
        let b = acc.trig[max_n * 2];
        let walk = LineWalk::new(point, a, b);

        let mut line_end = [point; 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let mut gap = 0;
            for p in walk.pixels(k) {
                if !in_bounds(p) {
                    break;
                }
                if mask[at(p)] {
                    gap = 0;
                    *end = p;
                } else {
                    gap += 1;
                    if gap > line_gap {
                        break;
                    }
                }
            }
        }

        let good_line = (line_end[1].x - line_end[0].x).abs() >= line_length
            || (line_end[1].y - line_end[0].y).abs() >= line_length;

        // Clear the walked pixels; accepted lines also withdraw the votes their
        // pixels already cast.
        for (k, end) in line_end.iter().enumerate() {
            for p in walk.pixels(k) {
                if !in_bounds(p) {
                    break;
                }
                let idx = at(p);
                if mask[idx] {
                    if good_line && voted[idx] {
                        acc.retract(p.x, p.y);
                    }
                    mask[idx] = false;
                }
                if p == *end {
                    break;
                }
            }
        }

        if good_line {
            segments.push(LineSegment::new(
                line_end[0].x,
                line_end[0].y,
                line_end[1].x,
                line_end[1].y,
            ));
            if segments.len() >= max_lines {
                break;
            }
        }
    }

    debug!(
        "detect_segments w={} h={} edge_px={} bins={}x{} segments={}",
        width,
        height,
        edge_pixels,
        acc.num_rho,
        acc.num_angle,
        segments.len()
    );
    Ok(segments)
}
