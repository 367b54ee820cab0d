//! Region-of-interest masking with a convex polygon.
//!
//! The polygon is stored in fractional image coordinates and scaled to the
//! target resolution on use. Rasterization tests each pixel centre against
//! the homogeneous line of every edge; a pixel belongs to the region when it
//! lies on the same side of (or on) all edges, which holds for convex
//! polygons in either winding order.
use crate::error::{LaneError, Result};
use crate::image::{u8::MAX_VALUE, ImageU8, ImageView};
use crate::types::Point;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Convex polygon with vertices as `[x / width, y / height]` fractions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionPolygon {
    pub vertices: Vec<[f64; 2]>,
}

impl Default for RegionPolygon {
    fn default() -> Self {
        Self::lane_trapezoid()
    }
}

impl RegionPolygon {
    pub fn new(vertices: Vec<[f64; 2]>) -> Self {
        Self { vertices }
    }

    /// Trapezoid from the bottom corners up to a narrow band at 60% height.
    pub fn lane_trapezoid() -> Self {
        Self::new(vec![[0.00, 1.00], [0.46, 0.60], [0.54, 0.60], [1.00, 1.00]])
    }

    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(LaneError::invalid(
                "roi",
                "region",
                format!(
                    "polygon needs at least 3 vertices, got {}",
                    self.vertices.len()
                ),
            ));
        }
        if let Some(v) = self
            .vertices
            .iter()
            .find(|v| !v[0].is_finite() || !v[1].is_finite())
        {
            return Err(LaneError::invalid(
                "roi",
                "region",
                format!("vertex {v:?} is not finite"),
            ));
        }
        Ok(())
    }

    /// Scale to pixel vertices for a `width × height` image (truncating).
    pub fn to_pixels(&self, width: usize, height: usize) -> Vec<Point> {
        self.vertices
            .iter()
            .map(|v| Point::new((v[0] * width as f64) as i32, (v[1] * height as f64) as i32))
            .collect()
    }
}

/// Rasterize the filled polygon into a `0 / 255` single-channel mask.
pub fn fill_convex_polygon(width: usize, height: usize, vertices: &[Point]) -> Result<ImageU8> {
    if vertices.len() < 3 {
        return Err(LaneError::invalid(
            "roi",
            "region",
            format!("polygon needs at least 3 vertices, got {}", vertices.len()),
        ));
    }
    let edges: Vec<Vector3<f64>> = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| homogeneous(a).cross(&homogeneous(b)))
        .collect();

    let mut mask = ImageU8::gray(width, height);
    if width == 0 {
        return Ok(mask);
    }
    mask.data
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let p = Vector3::new(x as f64, y as f64, 1.0);
                let mut pos = true;
                let mut neg = true;
                for line in &edges {
                    let side = line.dot(&p);
                    pos &= side >= 0.0;
                    neg &= side <= 0.0;
                }
                if pos || neg {
                    *px = MAX_VALUE;
                }
            }
        });
    Ok(mask)
}

/// Zero every pixel of `src` outside `region`; pixels inside are unchanged.
pub fn mask_region(src: &ImageU8, region: &RegionPolygon) -> Result<ImageU8> {
    region.validate()?;
    src.expect_channels("roi", 1)?;
    let vertices = region.to_pixels(src.w, src.h);
    let mask = fill_convex_polygon(src.w, src.h, &vertices)?;
    apply_mask(src, &mask)
}

/// Bitwise AND of a 1-channel image with an already rasterized mask.
pub fn apply_mask(src: &ImageU8, mask: &ImageU8) -> Result<ImageU8> {
    src.expect_channels("roi", 1)?;
    if !src.same_shape(mask) {
        return Err(LaneError::invalid(
            "roi",
            "mask",
            format!(
                "mask is {}x{}x{}, image is {}x{}x{}",
                mask.w, mask.h, mask.channels, src.w, src.h, src.channels
            ),
        ));
    }
    let mut out = mask.clone();
    out.data
        .par_iter_mut()
        .zip(src.data.par_iter())
        .for_each(|(m, &s)| *m &= s);
    Ok(out)
}

fn homogeneous(p: &Point) -> Vector3<f64> {
    Vector3::new(p.x as f64, p.y as f64, 1.0)
}
