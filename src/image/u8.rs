//! Owned 8-bit image with 1 (intensity/binary) or 3 (RGB) interleaved channels.
use crate::error::{LaneError, Result};

/// Maximum intensity; binary images hold only `0` and `MAX_VALUE`.
pub const MAX_VALUE: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageU8 {
    pub w: usize,
    pub h: usize,
    /// Interleaved channels per pixel (1 or 3).
    pub channels: usize,
    pub data: Vec<u8>,
}

impl ImageU8 {
    /// Zero-filled (black) image.
    pub fn new(w: usize, h: usize, channels: usize) -> Self {
        Self {
            w,
            h,
            channels,
            data: vec![0; w * h * channels],
        }
    }

    pub fn gray(w: usize, h: usize) -> Self {
        Self::new(w, h, 1)
    }

    pub fn rgb(w: usize, h: usize) -> Self {
        Self::new(w, h, 3)
    }

    /// Wrap a raw buffer, checking that its length matches the shape.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != 1 && channels != 3 {
            return Err(LaneError::invalid(
                "image",
                "channels",
                format!("expected 1 or 3 channels, got {channels}"),
            ));
        }
        let expected = w * h * channels;
        if data.len() != expected {
            return Err(LaneError::invalid(
                "image",
                "data",
                format!(
                    "buffer holds {} bytes, {w}x{h}x{channels} needs {expected}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Samples between consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.w * self.channels
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride() + x * self.channels
    }

    /// First channel at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    /// Write `v` to every channel at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i..i + self.channels].fill(v);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let i = self.idx(x, y);
        &self.data[i..i + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let i = self.idx(x, y);
        let c = self.channels;
        &mut self.data[i..i + c]
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True when every sample is either 0 or [`MAX_VALUE`].
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == 0 || v == MAX_VALUE)
    }

    pub fn count_nonzero(&self) -> usize {
        self.data
            .chunks_exact(self.channels)
            .filter(|px| px.iter().any(|&v| v != 0))
            .count()
    }

    pub(crate) fn expect_channels(&self, stage: &'static str, channels: usize) -> Result<()> {
        if self.channels != channels {
            return Err(LaneError::invalid(
                stage,
                "channels",
                format!(
                    "expected a {channels}-channel image, got {} channel(s)",
                    self.channels
                ),
            ));
        }
        if self.is_empty() {
            return Err(LaneError::invalid(
                stage,
                "size",
                format!("image is empty ({}x{})", self.w, self.h),
            ));
        }
        Ok(())
    }
}

impl crate::image::traits::ImageView for ImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride();
        &self.data[start..start + self.stride()]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl crate::image::traits::ImageViewMut for ImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.stride();
        let start = y * stride;
        &mut self.data[start..start + stride]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.data)
    }
}

impl From<image::RgbImage> for ImageU8 {
    fn from(img: image::RgbImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        Self {
            w,
            h,
            channels: 3,
            data: img.into_raw(),
        }
    }
}

impl From<image::GrayImage> for ImageU8 {
    fn from(img: image::GrayImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        Self {
            w,
            h,
            channels: 1,
            data: img.into_raw(),
        }
    }
}
