//! Side-by-side view of the pipeline stages for visual inspection.
use super::trace::PipelineTrace;
use crate::color::gray_to_rgb;
use crate::error::{LaneError, Result};
use crate::image::{ImageU8, ImageView, ImageViewMut};

/// Tiles per mosaic row.
pub const MOSAIC_COLUMNS: usize = 3;

/// Tile the stages into a 3×2 RGB grid:
///
/// | resized | gray    | edges     |
/// |---------|---------|-----------|
/// | masked  | overlay | composite |
pub fn stage_mosaic(trace: &PipelineTrace, composite: &ImageU8) -> Result<ImageU8> {
    let tiles = [
        &trace.resized,
        &trace.gray,
        &trace.edges,
        &trace.masked,
        &trace.overlay,
        composite,
    ];
    let (w, h) = (trace.resized.w, trace.resized.h);
    let rows = tiles.len().div_ceil(MOSAIC_COLUMNS);
    let mut out = ImageU8::rgb(w * MOSAIC_COLUMNS, h * rows);

    for (i, tile) in tiles.into_iter().enumerate() {
        if (tile.w, tile.h) != (w, h) {
            return Err(LaneError::invalid(
                "mosaic",
                "size",
                format!("tile {i} is {}x{}, expected {w}x{h}", tile.w, tile.h),
            ));
        }
        let expanded;
        let rgb = match tile.channels {
            3 => tile,
            _ => {
                expanded = gray_to_rgb(tile)?;
                &expanded
            }
        };
        let (ox, oy) = ((i % MOSAIC_COLUMNS) * w, (i / MOSAIC_COLUMNS) * h);
        for y in 0..h {
            let dst = out.row_mut(oy + y);
            dst[ox * 3..(ox + w) * 3].copy_from_slice(rgb.row(y));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: usize, h: usize, channels: usize, v: u8) -> ImageU8 {
        let mut img = ImageU8::new(w, h, channels);
        img.data.fill(v);
        img
    }

    fn trace(w: usize, h: usize) -> PipelineTrace {
        PipelineTrace {
            resized: filled(w, h, 3, 10),
            gray: filled(w, h, 1, 20),
            blurred: filled(w, h, 1, 25),
            edges: filled(w, h, 1, 30),
            region_mask: filled(w, h, 1, 35),
            masked: filled(w, h, 1, 40),
            overlay: filled(w, h, 3, 50),
        }
    }

    #[test]
    fn stages_land_in_their_tiles() {
        let composite = filled(8, 6, 3, 60);
        let mosaic = stage_mosaic(&trace(8, 6), &composite).unwrap();
        assert_eq!((mosaic.w, mosaic.h, mosaic.channels), (24, 12, 3));
        let expected = [[10, 20, 30], [40, 50, 60]];
        for (ty, row) in expected.iter().enumerate() {
            for (tx, &v) in row.iter().enumerate() {
                let (x, y) = (tx * 8, ty * 6);
                assert_eq!(mosaic.pixel(x, y), &[v, v, v]);
                assert_eq!(mosaic.pixel(x + 7, y + 5), &[v, v, v]);
            }
        }
    }

    #[test]
    fn mismatched_tile_is_rejected() {
        let composite = filled(4, 6, 3, 60);
        assert!(matches!(
            stage_mosaic(&trace(8, 6), &composite),
            Err(LaneError::InvalidParameter { stage: "mosaic", .. })
        ));
    }
}
