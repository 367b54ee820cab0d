//! Separable Gaussian smoothing of single-channel images.
//!
//! Filtering runs a horizontal pass into a float buffer followed by a
//! vertical pass, both data-parallel over rows. Out-of-range taps follow the
//! requested [`BorderMode`].

pub mod filters;

pub use filters::{BorderMode, GaussianFilter, SeparableFilter};

use crate::error::Result;
use crate::image::{ImageF32, ImageU8, ImageView};
use rayon::prelude::*;

/// Blur a 1-channel image with an odd `kernel_size` Gaussian.
///
/// `sigma == 0` derives the standard deviation from the kernel size.
pub fn gaussian_blur(
    src: &ImageU8,
    kernel_size: usize,
    sigma: f64,
    border: BorderMode,
) -> Result<ImageU8> {
    let filter = GaussianFilter::new(kernel_size, sigma)?;
    src.expect_channels("blur", 1)?;
    Ok(apply(&filter, src, border))
}

/// Convolve `src` with `filter` along both axes.
pub fn apply<F: SeparableFilter + ?Sized>(
    filter: &F,
    src: &ImageU8,
    border: BorderMode,
) -> ImageU8 {
    let (w, h) = (src.w, src.h);
    let taps = filter.taps();
    let radius = filter.radius() as isize;
    let fill = match border {
        BorderMode::Constant(v) => v as f32,
        _ => 0.0,
    };

    let mut horiz = ImageF32::new(w, h);
    horiz
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| {
            let row = src.row(y);
            for (x, out) in dst.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (k, &tap) in taps.iter().enumerate() {
                    let sx = x as isize + k as isize - radius;
                    let v = border.resolve(sx, w).map_or(fill, |i| row[i] as f32);
                    acc += tap * v;
                }
                *out = acc;
            }
        });

    let mut out = ImageU8::gray(w, h);
    out.data.par_chunks_mut(w).enumerate().for_each(|(y, dst)| {
        for (x, out_px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = y as isize + k as isize - radius;
                let v = border.resolve(sy, h).map_or(fill, |i| horiz.get(x, i));
                acc += tap * v;
            }
            *out_px = acc.round().clamp(0.0, 255.0) as u8;
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;

    #[test]
    fn flat_image_is_unchanged() {
        let mut img = ImageU8::gray(20, 15);
        img.data.fill(123);
        let out = gaussian_blur(&img, 7, 0.0, BorderMode::Reflect101).unwrap();
        assert_eq!((out.w, out.h), (20, 15));
        assert!(out.data.iter().all(|&v| v == 123));
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut img = ImageU8::gray(11, 11);
        img.set(5, 5, 255);
        let out = gaussian_blur(&img, 5, 1.0, BorderMode::Replicate).unwrap();
        let center = out.get(5, 5);
        assert!(center < 255 && center > 0);
        assert_eq!(out.get(4, 5), out.get(6, 5));
        assert_eq!(out.get(5, 4), out.get(5, 6));
        assert!(out.get(4, 5) < center);
        assert_eq!(out.get(0, 0), 0);
    }

    #[test]
    fn constant_border_pulls_edges_towards_fill() {
        let mut img = ImageU8::gray(9, 9);
        img.data.fill(200);
        let out = gaussian_blur(&img, 5, 0.0, BorderMode::Constant(0)).unwrap();
        assert!(out.get(0, 4) < 200);
        assert_eq!(out.get(4, 4), 200);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let img = ImageU8::gray(8, 8);
        assert!(matches!(
            gaussian_blur(&img, 4, 0.0, BorderMode::default()),
            Err(LaneError::InvalidParameter { stage: "blur", .. })
        ));
    }
}
