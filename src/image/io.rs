//! I/O helpers for color/gray images and JSON.
//!
//! - `load_color_image`: read a PNG/JPEG into an owned 3-channel buffer.
//! - `save_image`: write a 1- or 3-channel `ImageU8` to disk (format from the extension).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use crate::error::{LaneError, Result};
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGB.
pub fn load_color_image(path: &Path) -> Result<ImageU8> {
    let img = image::open(path)
        .map_err(|e| LaneError::image_load(path, e))?
        .into_rgb8();
    let image = ImageU8::from(img);
    if image.is_empty() {
        return Err(LaneError::image_load(path, "decoded image is empty"));
    }
    Ok(image)
}

/// Save an 8-bit image; 1-channel buffers are written as grayscale.
pub fn save_image(image: &ImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let (w, h) = (image.w as u32, image.h as u32);
    let data = image.data.clone();
    let saved = match image.channels {
        1 => GrayImage::from_raw(w, h, data)
            .ok_or_else(|| LaneError::image_save(path, "failed to create image buffer"))?
            .save(path),
        3 => RgbImage::from_raw(w, h, data)
            .ok_or_else(|| LaneError::image_save(path, "failed to create image buffer"))?
            .save(path),
        c => {
            return Err(LaneError::image_save(
                path,
                format!("unsupported channel count {c}"),
            ))
        }
    };
    saved.map_err(|e| LaneError::image_save(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LaneError::image_save(path, format!("JSON serialization failed: {e}")))?;
    fs::write(path, json).map_err(|e| LaneError::image_save(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| LaneError::image_save(parent, e))?;
        }
    }
    Ok(())
}
