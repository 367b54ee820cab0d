//! Color ↔ intensity conversion.
//!
//! Uses the ITU-R BT.601 luma weights on RGB-ordered input.
use crate::error::Result;
use crate::image::ImageU8;
use rayon::prelude::*;

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Reduce a 3-channel RGB image to a single luma channel.
pub fn rgb_to_gray(src: &ImageU8) -> Result<ImageU8> {
    src.expect_channels("grayscale", 3)?;
    let mut out = ImageU8::gray(src.w, src.h);
    out.data
        .par_chunks_mut(src.w)
        .zip(src.data.par_chunks(src.stride()))
        .for_each(|(dst, row)| {
            for (d, px) in dst.iter_mut().zip(row.chunks_exact(3)) {
                let v = LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
                *d = v.round().clamp(0.0, 255.0) as u8;
            }
        });
    Ok(out)
}

/// Replicate a single channel into RGB, for visualizing intermediate stages.
pub fn gray_to_rgb(src: &ImageU8) -> Result<ImageU8> {
    src.expect_channels("grayscale", 1)?;
    let mut out = ImageU8::rgb(src.w, src.h);
    out.data
        .par_chunks_mut(3)
        .zip(src.data.par_iter())
        .for_each(|(px, &v)| px.fill(v));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;

    #[test]
    fn luma_weights_match_primaries() {
        let mut img = ImageU8::rgb(4, 1);
        img.pixel_mut(0, 0).copy_from_slice(&[255, 0, 0]);
        img.pixel_mut(1, 0).copy_from_slice(&[0, 255, 0]);
        img.pixel_mut(2, 0).copy_from_slice(&[0, 0, 255]);
        img.pixel_mut(3, 0).copy_from_slice(&[255, 255, 255]);
        let gray = rgb_to_gray(&img).unwrap();
        assert_eq!(gray.data, vec![76, 150, 29, 255]);
    }

    #[test]
    fn grayscale_preserves_dimensions() {
        let img = ImageU8::rgb(17, 9);
        let gray = rgb_to_gray(&img).unwrap();
        assert_eq!((gray.w, gray.h, gray.channels), (17, 9, 1));
    }

    #[test]
    fn grayscale_rejects_single_channel_input() {
        let img = ImageU8::gray(4, 4);
        assert!(matches!(
            rgb_to_gray(&img),
            Err(LaneError::InvalidParameter { stage: "grayscale", .. })
        ));
    }
}
