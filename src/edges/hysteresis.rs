//! Two-threshold edge linking.
//!
//! Pixels above `high` seed the edge set; pixels above `low` join it when
//! 8-connected to a seed, directly or through other joined pixels.
use crate::image::{u8::MAX_VALUE, ImageF32, ImageU8};

const STRONG: u8 = 2;
const WEAK: u8 = 1;

/// Link suppressed magnitudes into a binary `0 / 255` edge map.
pub fn hysteresis(nms: &ImageF32, low: f32, high: f32) -> ImageU8 {
    let (width, height) = (nms.w, nms.h);
    let mut state = vec![0u8; width * height];
    let mut stack = Vec::new();

    for (idx, &v) in nms.data.iter().enumerate() {
        if v > high {
            state[idx] = STRONG;
            stack.push((idx % width, idx / width));
        } else if v > low {
            state[idx] = WEAK;
        }
    }

    while let Some((x, y)) = stack.pop() {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * width + nx;
                if state[nidx] == WEAK {
                    state[nidx] = STRONG;
                    stack.push((nx, ny));
                }
            }
        }
    }

    let data = state
        .into_iter()
        .map(|s| if s == STRONG { MAX_VALUE } else { 0 })
        .collect();
    ImageU8 {
        w: width,
        h: height,
        channels: 1,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_pixels_survive_only_when_connected() {
        let mut nms = ImageF32::new(8, 3);
        // Chain: strong at x=1, weak at x=2..=3, gap at x=4, isolated weak at x=6.
        nms.set(1, 1, 150.0);
        nms.set(2, 1, 70.0);
        nms.set(3, 1, 70.0);
        nms.set(6, 1, 70.0);
        let edges = hysteresis(&nms, 60.0, 100.0);
        assert_eq!(edges.get(1, 1), 255);
        assert_eq!(edges.get(2, 1), 255);
        assert_eq!(edges.get(3, 1), 255);
        assert_eq!(edges.get(6, 1), 0);
        assert!(edges.is_binary());
    }
}
