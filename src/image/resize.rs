//! Entry normalization to the pipeline's working resolution.
use super::ImageU8;
use crate::color::gray_to_rgb;
use crate::error::{LaneError, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Resize a color image to `width × height` with bilinear filtering.
///
/// Single-channel inputs are expanded to RGB first so the result always has
/// three channels.
pub fn resize_color(src: &ImageU8, width: usize, height: usize) -> Result<ImageU8> {
    if width == 0 || height == 0 {
        return Err(LaneError::invalid(
            "resize",
            "resolution",
            format!("working resolution must be positive, got {width}x{height}"),
        ));
    }
    if src.is_empty() {
        return Err(LaneError::invalid("resize", "size", "input image is empty"));
    }
    let rgb = match src.channels {
        3 => src.clone(),
        1 => gray_to_rgb(src)?,
        c => {
            return Err(LaneError::invalid(
                "resize",
                "channels",
                format!("unsupported channel count {c}"),
            ))
        }
    };
    if rgb.w == width && rgb.h == height {
        return Ok(rgb);
    }

    let buffer = RgbImage::from_raw(rgb.w as u32, rgb.h as u32, rgb.data)
        .ok_or_else(|| LaneError::invalid("resize", "data", "buffer does not match shape"))?;
    let resized = imageops::resize(&buffer, width as u32, height as u32, FilterType::Triangle);
    Ok(ImageU8::from(resized))
}
