//! Thick line rasterization onto RGB images.
use crate::error::{LaneError, Result};
use crate::image::ImageU8;

/// Draw a round-capped line of `thickness` pixels between two sub-pixel
/// endpoints. Parts outside the image are clipped.
pub fn draw_thick_line(
    img: &mut ImageU8,
    from: [f64; 2],
    to: [f64; 2],
    color: [u8; 3],
    thickness: u32,
) -> Result<()> {
    img.expect_channels("overlay", 3)?;
    if thickness == 0 {
        return Err(LaneError::invalid(
            "overlay",
            "thickness",
            "line thickness must be at least 1",
        ));
    }
    let radius = (thickness / 2) as i32;
    let margin = radius as f64 + 1.0;
    let bounds = [
        -margin,
        -margin,
        img.w as f64 - 1.0 + margin,
        img.h as f64 - 1.0 + margin,
    ];
    let Some((p0, p1)) = clip_to_rect(from, to, bounds) else {
        return Ok(());
    };

    let (mut x0, mut y0) = (p0[0].round() as i32, p0[1].round() as i32);
    let (x1, y1) = (p1[0].round() as i32, p1[1].round() as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp_disc(img, x0, y0, radius, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    Ok(())
}

fn stamp_disc(img: &mut ImageU8, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let r2 = radius * radius;
    let (w, h) = (img.w as i32, img.h as i32);
    for y in (cy - radius).max(0)..=(cy + radius).min(h - 1) {
        for x in (cx - radius).max(0)..=(cx + radius).min(w - 1) {
            if (x - cx).pow(2) + (y - cy).pow(2) <= r2 {
                img.pixel_mut(x as usize, y as usize).copy_from_slice(&color);
            }
        }
    }
}

/// Liang–Barsky clipping against `[xmin, ymin, xmax, ymax]`.
fn clip_to_rect(a: [f64; 2], b: [f64; 2], rect: [f64; 4]) -> Option<([f64; 2], [f64; 2])> {
    if !(a.iter().chain(b.iter()).all(|v| v.is_finite())) {
        return None;
    }
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, a[0] - rect[0]),
        (dx, rect[2] - a[0]),
        (-dy, a[1] - rect[1]),
        (dy, rect[3] - a[1]),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        [a[0] + t0 * dx, a[1] + t0 * dy],
        [a[0] + t1 * dx, a[1] + t1 * dy],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn horizontal_line_has_requested_thickness() {
        let mut img = ImageU8::rgb(40, 20);
        draw_thick_line(&mut img, [5.0, 10.0], [30.0, 10.0], RED, 8).unwrap();
        assert_eq!(img.pixel(15, 10), &RED);
        // Radius 4 around row 10.
        assert_eq!(img.pixel(15, 6), &RED);
        assert_eq!(img.pixel(15, 14), &RED);
        assert_eq!(img.pixel(15, 5), &[0, 0, 0]);
        assert_eq!(img.pixel(15, 15), &[0, 0, 0]);
        // Round caps extend past the endpoints.
        assert_eq!(img.pixel(2, 10), &RED);
        assert_eq!(img.pixel(0, 10), &[0, 0, 0]);
    }

    #[test]
    fn far_endpoints_are_clipped() {
        let mut img = ImageU8::rgb(32, 32);
        draw_thick_line(&mut img, [-1.0e9, 16.0], [1.0e9, 16.0], RED, 2).unwrap();
        assert!((0..32).all(|x| img.pixel(x, 16) == RED));
        assert_eq!(img.pixel(10, 0), &[0, 0, 0]);
    }

    #[test]
    fn line_outside_image_draws_nothing() {
        let mut img = ImageU8::rgb(16, 16);
        draw_thick_line(&mut img, [-50.0, -50.0], [-20.0, -60.0], RED, 4).unwrap();
        assert_eq!(img.count_nonzero(), 0);
    }

    #[test]
    fn zero_thickness_is_rejected() {
        let mut img = ImageU8::rgb(4, 4);
        assert!(draw_thick_line(&mut img, [0.0, 0.0], [3.0, 3.0], RED, 0).is_err());
    }
}
