//! Weighted blending of two images.
use crate::error::{LaneError, Result};
use crate::image::{ImageU8, ImageView};
use rayon::prelude::*;

/// Per-sample `saturate(round(alpha·overlay + beta·base + gamma))`.
pub fn add_weighted(
    overlay: &ImageU8,
    alpha: f64,
    base: &ImageU8,
    beta: f64,
    gamma: f64,
) -> Result<ImageU8> {
    for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
        if !value.is_finite() {
            return Err(LaneError::invalid(
                "blend",
                name,
                format!("weight must be finite, got {value}"),
            ));
        }
    }
    if !overlay.same_shape(base) {
        return Err(LaneError::invalid(
            "blend",
            "shape",
            format!(
                "overlay is {}x{}x{}, base is {}x{}x{}",
                overlay.w, overlay.h, overlay.channels, base.w, base.h, base.channels
            ),
        ));
    }

    let (a, b, g) = (alpha as f32, beta as f32, gamma as f32);
    let mut out = ImageU8::new(base.w, base.h, base.channels);
    let stride = base.stride().max(1);
    out.data
        .par_chunks_mut(stride)
        .zip(overlay.data.par_chunks(stride))
        .zip(base.data.par_chunks(stride))
        .for_each(|((dst, o), s)| {
            for ((d, &ov), &sv) in dst.iter_mut().zip(o).zip(s) {
                let v = a * ov as f32 + b * sv as f32 + g;
                *d = v.round().clamp(0.0, 255.0) as u8;
            }
        });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: usize, h: usize, v: u8) -> ImageU8 {
        let mut img = ImageU8::rgb(w, h);
        img.data.fill(v);
        img
    }

    #[test]
    fn unit_alpha_zero_beta_returns_overlay() {
        let mut overlay = filled(6, 4, 0);
        overlay.pixel_mut(2, 1).copy_from_slice(&[255, 0, 0]);
        let base = filled(6, 4, 77);
        let out = add_weighted(&overlay, 1.0, &base, 0.0, 0.0).unwrap();
        assert_eq!(out, overlay);
    }

    #[test]
    fn reference_blend_saturates() {
        let overlay = filled(2, 2, 255);
        let base = filled(2, 2, 100);
        let out = add_weighted(&overlay, 1.0, &base, 0.8, 0.0).unwrap();
        assert!(out.data.iter().all(|&v| v == 255));

        let black = filled(2, 2, 0);
        let out = add_weighted(&black, 1.0, &base, 0.8, 0.0).unwrap();
        assert!(out.data.iter().all(|&v| v == 80));
    }

    #[test]
    fn negative_result_clamps_to_zero() {
        let img = filled(3, 3, 10);
        let out = add_weighted(&img, 1.0, &img, 1.0, -50.0).unwrap();
        assert!(out.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn shape_mismatch_and_bad_weights_are_rejected() {
        let a = filled(4, 4, 0);
        let b = filled(4, 5, 0);
        assert!(matches!(
            add_weighted(&a, 1.0, &b, 0.8, 0.0),
            Err(LaneError::InvalidParameter { parameter: "shape", .. })
        ));
        assert!(matches!(
            add_weighted(&a, f64::NAN, &a, 0.8, 0.0),
            Err(LaneError::InvalidParameter { parameter: "alpha", .. })
        ));
    }
}
