//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! Each pixel is compared against its two neighbours along the gradient
//! direction quantized to 0°, 45°, 90° or 135°. Survivors keep their
//! magnitude; everything else (and anything not above `low`) becomes 0.
//! Neighbours outside the image read as zero magnitude.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView};
use rayon::prelude::*;

const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Thin the magnitude map to one-pixel ridges, dropping values `<= low`.
pub fn run_nms(grad: &Grad, low: f32) -> ImageF32 {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let zeros = vec![0.0f32; w];

    out.data.par_chunks_mut(w).enumerate().for_each(|(y, dst)| {
        let mag_prev = if y > 0 { grad.mag.row(y - 1) } else { &zeros[..] };
        let mag_row = grad.mag.row(y);
        let mag_next = if y + 1 < h { grad.mag.row(y + 1) } else { &zeros[..] };
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let at = |row: &[f32], x: isize| -> f32 {
            if x < 0 || x >= w as isize {
                0.0
            } else {
                row[x as usize]
            }
        };

        for x in 0..w {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }
            let xi = x as isize;
            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let keep = if abs_gy <= abs_gx * TAN_22_5_DEG {
                mag > at(mag_row, xi - 1) && mag >= at(mag_row, xi + 1)
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                mag > mag_prev[x] && mag >= mag_next[x]
            } else {
                // Gradient along the main diagonal when gx and gy share a sign
                // (image y grows downwards).
                let s: isize = if (gx < 0.0) != (gy < 0.0) { -1 } else { 1 };
                mag > at(mag_prev, xi - s) && mag > at(mag_next, xi + s)
            };

            if keep {
                dst[x] = mag;
            }
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::{sobel_gradients, GradientNorm};

    #[test]
    fn step_edge_is_thinned_to_single_column() {
        let mut img = ImageF32::new(12, 6);
        for y in 0..6 {
            for x in 6..12 {
                img.set(x, y, 200.0);
            }
        }
        let grad = sobel_gradients(&img, 3, GradientNorm::L1).unwrap();
        let thin = run_nms(&grad, 10.0);
        for y in 0..6 {
            let kept: Vec<usize> = (0..12).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert_eq!(kept, vec![5], "row {y}");
        }
    }
}
