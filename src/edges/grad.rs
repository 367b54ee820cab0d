//! Sobel image gradients with a configurable aperture.
//!
//! - Builds separable Sobel kernels for apertures 3, 5 and 7 (binomial
//!   smoothing along one axis, a binomial-smoothed central difference along
//!   the other).
//! - Border samples replicate the nearest edge pixel.
//! - Outputs per-pixel `gx`, `gy` and the magnitude under the chosen norm.
//!
//! Complexity: O(W·H·k) per pass; memory: three float buffers plus one
//! temporary per axis.
use crate::error::{LaneError, Result};
use crate::image::{ImageF32, ImageView, ImageViewMut};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// Magnitude under [`GradientNorm`]
    pub mag: ImageF32,
}

/// How the gradient magnitude is computed from `gx` and `gy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientNorm {
    /// `|gx| + |gy|`
    #[default]
    L1,
    /// `sqrt(gx² + gy²)`
    L2,
}

impl GradientNorm {
    #[inline]
    pub fn magnitude(self, gx: f32, gy: f32) -> f32 {
        match self {
            GradientNorm::L1 => gx.abs() + gy.abs(),
            GradientNorm::L2 => (gx * gx + gy * gy).sqrt(),
        }
    }
}

/// Separable Sobel kernel pair `(derivative, smoothing)` for `aperture`.
pub fn sobel_kernels(aperture: usize) -> Result<(Vec<f32>, Vec<f32>)> {
    if !(3..=7).contains(&aperture) || aperture % 2 == 0 {
        return Err(LaneError::invalid(
            "edges",
            "aperture",
            format!("aperture must be 3, 5 or 7, got {aperture}"),
        ));
    }
    let smooth = binomial(aperture - 1);
    let base = binomial(aperture - 3);
    let mut deriv = vec![0.0f32; aperture];
    // Convolve the order-(k-3) binomial with the central difference [-1, 0, 1].
    for (i, &b) in base.iter().enumerate() {
        deriv[i] -= b;
        deriv[i + 2] += b;
    }
    Ok((deriv, smooth))
}

fn binomial(order: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 0..order {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Compute Sobel gradients of a single-channel float image.
pub fn sobel_gradients(l: &ImageF32, aperture: usize, norm: GradientNorm) -> Result<Grad> {
    let (deriv, smooth) = sobel_kernels(aperture)?;
    let gx = convolve_separable(l, &deriv, &smooth);
    let gy = convolve_separable(l, &smooth, &deriv);

    let mut mag = ImageF32::new(l.w, l.h);
    mag.data
        .par_iter_mut()
        .zip(gx.data.par_iter().zip(gy.data.par_iter()))
        .for_each(|(m, (&dx, &dy))| *m = norm.magnitude(dx, dy));

    Ok(Grad { gx, gy, mag })
}

/// Apply `kx` along rows then `ky` along columns with replicated borders.
fn convolve_separable(l: &ImageF32, kx: &[f32], ky: &[f32]) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let mut tmp = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return tmp;
    }
    let rx = (kx.len() / 2) as isize;
    let ry = (ky.len() / 2) as isize;
    let max_x = w as isize - 1;
    let max_y = h as isize - 1;

    tmp.data.par_chunks_mut(w).enumerate().for_each(|(y, dst)| {
        let row = l.row(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in kx.iter().enumerate() {
                let sx = (x as isize + k as isize - rx).clamp(0, max_x) as usize;
                acc += tap * row[sx];
            }
            *out = acc;
        }
    });

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &tap) in ky.iter().enumerate() {
            if tap == 0.0 {
                continue;
            }
            let sy = (y as isize + k as isize - ry).clamp(0, max_y) as usize;
            for (d, &s) in dst.iter_mut().zip(tmp.row(sy)) {
                *d += tap * s;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sobel_kernels_match_reference_taps() {
        let (d3, s3) = sobel_kernels(3).unwrap();
        assert_eq!(d3, vec![-1.0, 0.0, 1.0]);
        assert_eq!(s3, vec![1.0, 2.0, 1.0]);
        let (d5, s5) = sobel_kernels(5).unwrap();
        assert_eq!(d5, vec![-1.0, -2.0, 0.0, 2.0, 1.0]);
        assert_eq!(s5, vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        let (d7, _) = sobel_kernels(7).unwrap();
        assert_eq!(d7, vec![-1.0, -4.0, -5.0, 0.0, 5.0, 4.0, 1.0]);
    }

    #[test]
    fn invalid_apertures_are_rejected() {
        for aperture in [0, 1, 2, 4, 9] {
            assert!(sobel_kernels(aperture).is_err(), "aperture {aperture}");
        }
    }

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let mut img = ImageF32::new(8, 8);
        for y in 0..8 {
            for x in 4..8 {
                img.set(x, y, 100.0);
            }
        }
        let grad = sobel_gradients(&img, 3, GradientNorm::L1).unwrap();
        assert_eq!(grad.gx.get(4, 4), 400.0);
        assert_eq!(grad.gy.get(4, 4), 0.0);
        assert_eq!(grad.mag.get(4, 4), 400.0);
        assert_eq!(grad.mag.get(1, 4), 0.0);
    }
}
