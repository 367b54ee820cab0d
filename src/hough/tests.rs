use super::*;
use crate::image::ImageU8;

fn draw_pixels(img: &mut ImageU8, pts: impl IntoIterator<Item = (usize, usize)>) {
    for (x, y) in pts {
        img.set(x, y, 255);
    }
}

#[test]
fn horizontal_run_becomes_one_segment() {
    let mut img = ImageU8::gray(64, 32);
    draw_pixels(&mut img, (10..50).map(|x| (x, 16)));
    // Only the horizontal bin can collect all 40 votes.
    let segs = detect_segments(&img, &HoughOptions {
        rho: 1.0,
        threshold: 40,
        ..HoughOptions::default()
    })
    .unwrap();
    assert_eq!(segs.len(), 1, "got {segs:?}");
    let s = segs[0];
    let (xmin, xmax) = (s.x1.min(s.x2), s.x1.max(s.x2));
    assert_eq!((xmin, xmax), (10, 49));
    assert_eq!((s.y1, s.y2), (16, 16));
}

#[test]
fn gaps_up_to_max_gap_are_bridged() {
    let mut img = ImageU8::gray(64, 64);
    // Vertical line at x=20 with a 4-pixel hole.
    draw_pixels(&mut img, (5..25).chain(29..50).map(|y| (20, y)));
    let bridged = detect_segments(&img, &HoughOptions {
        rho: 1.0,
        threshold: 41,
        max_line_gap: 5.0,
        ..HoughOptions::default()
    })
    .unwrap();
    assert_eq!(bridged.len(), 1, "got {bridged:?}");
    let s = bridged[0];
    assert_eq!((s.y1.min(s.y2), s.y1.max(s.y2)), (5, 49));

    let split = detect_segments(&img, &HoughOptions {
        rho: 1.0,
        max_line_gap: 2.0,
        ..HoughOptions::default()
    })
    .unwrap();
    assert!(split.len() >= 2, "got {split:?}");
    for s in &split {
        let (lo, hi) = (s.y1.min(s.y2), s.y1.max(s.y2));
        assert!(hi < 25 || lo > 28, "segment {s:?} spans the hole");
    }
    assert!(split.iter().any(|s| s.y1.max(s.y2) < 25));
    assert!(split.iter().any(|s| s.y1.min(s.y2) > 28));
}

#[test]
fn short_runs_are_discarded() {
    let mut img = ImageU8::gray(32, 32);
    // Dense blob of 12 pixels, each run shorter than min length.
    draw_pixels(&mut img, (0..4).flat_map(|x| (0..3).map(move |y| (10 + x, 10 + y))));
    let segs = detect_segments(&img, &HoughOptions {
        rho: 1.0,
        threshold: 3,
        min_line_length: 20.0,
        ..HoughOptions::default()
    })
    .unwrap();
    assert!(segs.is_empty(), "got {segs:?}");
}

#[test]
fn empty_image_yields_no_segments() {
    let img = ImageU8::gray(40, 30);
    let segs = detect_segments(&img, &HoughOptions::default()).unwrap();
    assert!(segs.is_empty());
}

#[test]
fn same_seed_is_deterministic() {
    let mut img = ImageU8::gray(80, 60);
    draw_pixels(&mut img, (0..50).map(|i| (10 + i, 55 - i)));
    draw_pixels(&mut img, (0..40).map(|i| (20 + i, 5 + i)));
    let opts = HoughOptions::default();
    let a = detect_segments(&img, &opts).unwrap();
    let b = detect_segments(&img, &opts).unwrap();
    assert_eq!(a, b);
    assert!(!a.is_empty());
}

#[test]
fn max_lines_caps_output() {
    let mut img = ImageU8::gray(64, 64);
    for row in [10usize, 30, 50] {
        draw_pixels(&mut img, (5..60).map(|x| (x, row)));
    }
    let segs = detect_segments(&img, &HoughOptions {
        rho: 1.0,
        max_lines: Some(2),
        ..HoughOptions::default()
    })
    .unwrap();
    assert_eq!(segs.len(), 2);
}

#[test]
fn invalid_options_are_rejected() {
    let img = ImageU8::gray(8, 8);
    for opts in [
        HoughOptions {
            rho: 0.0,
            ..HoughOptions::default()
        },
        HoughOptions {
            theta: -1.0,
            ..HoughOptions::default()
        },
        HoughOptions {
            threshold: 0,
            ..HoughOptions::default()
        },
        HoughOptions {
            max_line_gap: f64::NAN,
            ..HoughOptions::default()
        },
    ] {
        assert!(detect_segments(&img, &opts).is_err(), "{opts:?}");
    }
}
