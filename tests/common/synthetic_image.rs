use lane_finder::image::ImageU8;

pub const ROAD: u8 = 40;
pub const PAINT: u8 = 230;

/// A painted stroke between two pixel positions.
#[derive(Clone, Copy, Debug)]
pub struct Stroke {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub half_width: f64,
}

impl Stroke {
    pub fn slope(&self) -> f64 {
        (self.to[1] - self.from[1]) / (self.to[0] - self.from[0])
    }

    fn distance(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (self.to[0] - self.from[0], self.to[1] - self.from[1]);
        let len2 = dx * dx + dy * dy;
        let t = (((x - self.from[0]) * dx + (y - self.from[1]) * dy) / len2).clamp(0.0, 1.0);
        let (px, py) = (self.from[0] + t * dx, self.from[1] + t * dy);
        (x - px).hypot(y - py)
    }
}

/// Left boundary on a 640×480 frame, rising towards the centre.
pub fn left_stroke() -> Stroke {
    Stroke {
        from: [80.0, 479.0],
        to: [290.0, 310.0],
        half_width: 5.0,
    }
}

/// Mirror of [`left_stroke`].
pub fn right_stroke() -> Stroke {
    Stroke {
        from: [560.0, 479.0],
        to: [350.0, 310.0],
        half_width: 5.0,
    }
}

/// Dark RGB road with light lane strokes.
pub fn road_scene(width: usize, height: usize, strokes: &[Stroke]) -> ImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = ImageU8::rgb(width, height);
    img.data.fill(ROAD);
    for y in 0..height {
        for x in 0..width {
            let (fx, fy) = (x as f64, y as f64);
            if strokes.iter().any(|s| s.distance(fx, fy) <= s.half_width) {
                img.pixel_mut(x, y).fill(PAINT);
            }
        }
    }
    img
}
