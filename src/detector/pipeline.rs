//! Detector pipeline orchestrating one pass from color image to composite.
//!
//! Stages, strictly in order:
//! - Resize to the working resolution.
//! - Grayscale, Gaussian blur, Canny edges.
//! - Region-of-interest masking.
//! - Probabilistic Hough segments.
//! - Classification, per-side least squares and lane drawing.
//! - Weighted blend over the resized input.
//!
//! ```no_run
//! use lane_finder::{LaneDetector, LaneParams};
//! use lane_finder::image::ImageU8;
//!
//! # fn example(image: ImageU8) -> lane_finder::Result<()> {
//! let detector = LaneDetector::new(LaneParams::default())?;
//! let report = detector.process_with_diagnostics(&image)?;
//! println!("segments={}", report.report.segments.len());
//! # Ok(())
//! # }
//! ```

use super::params::LaneParams;
use crate::blur::gaussian_blur;
use crate::color::rgb_to_gray;
use crate::compose::add_weighted;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    DetectionReport, InputDescriptor, LaneReport, PipelineTrace, SideReport, TimingBreakdown,
};
use crate::edges::detect_edges;
use crate::error::Result;
use crate::hough::detect_segments;
use crate::image::{resize_color, ImageU8};
use crate::lanes::{fit_lanes, render_lanes, LaneClassifier, LaneEstimate};
use crate::roi::{apply_mask, fill_convex_polygon};
use crate::types::{LaneSide, LineSegment};
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

/// Result of one run.
#[derive(Clone, Debug)]
pub struct LaneDetection {
    /// Hough segments in working-resolution pixels.
    pub segments: Vec<LineSegment>,
    pub estimate: LaneEstimate,
    /// Lanes blended over the resized input (RGB).
    pub composite: ImageU8,
    pub timings: TimingBreakdown,
}

/// Lane detector holding validated parameters and a classification strategy.
pub struct LaneDetector {
    params: LaneParams,
    classifier: Box<dyn LaneClassifier>,
}

impl LaneDetector {
    /// Validate `params` and build the configured classifier.
    pub fn new(params: LaneParams) -> Result<Self> {
        params.validate()?;
        let classifier = params.classifier.build();
        Ok(Self { params, classifier })
    }

    /// Replace the classification strategy.
    pub fn with_classifier(mut self, classifier: Box<dyn LaneClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn params(&self) -> &LaneParams {
        &self.params
    }

    pub fn classifier(&self) -> &dyn LaneClassifier {
        self.classifier.as_ref()
    }

    /// Run the pipeline on a color (or gray) image of any size.
    pub fn process(&self, image: &ImageU8) -> Result<LaneDetection> {
        self.run(image).map(|(detection, _)| detection)
    }

    /// Like [`process`](Self::process), also returning every intermediate
    /// image and a serializable report.
    pub fn process_with_diagnostics(&self, image: &ImageU8) -> Result<DetectionReport> {
        let (detection, trace) = self.run(image)?;
        let report = LaneReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                working_width: self.params.width,
                working_height: self.params.height,
            },
            classifier: self.classifier.name().to_string(),
            edge_pixels: trace.edges.count_nonzero(),
            masked_edge_pixels: trace.masked.count_nonzero(),
            segments: detection.segments.clone(),
            left: SideReport::from_result(LaneSide::Left, &detection.estimate.left),
            right: SideReport::from_result(LaneSide::Right, &detection.estimate.right),
            timings: detection.timings.clone(),
        };
        Ok(DetectionReport {
            detection,
            trace,
            report,
        })
    }

    /// Process independent images in parallel; results keep the input order.
    pub fn process_batch(&self, images: &[ImageU8]) -> Vec<Result<LaneDetection>> {
        images.par_iter().map(|img| self.process(img)).collect()
    }

    fn run(&self, image: &ImageU8) -> Result<(LaneDetection, PipelineTrace)> {
        let p = &self.params;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let resized = resize_color(image, p.width, p.height)?;
        let ms = timings.record("resize", start);
        debug!(
            "resize {}x{} -> {}x{} ms={:.3}",
            image.w, image.h, resized.w, resized.h, ms
        );

        let start = Instant::now();
        let gray = rgb_to_gray(&resized)?;
        let ms = timings.record("grayscale", start);
        debug!("grayscale ms={:.3}", ms);

        let start = Instant::now();
        let blurred = gaussian_blur(&gray, p.blur.kernel_size, p.blur.sigma, p.blur.border)?;
        let ms = timings.record("blur", start);
        debug!(
            "blur kernel={} sigma={} border={:?} ms={:.3}",
            p.blur.kernel_size, p.blur.sigma, p.blur.border, ms
        );

        let start = Instant::now();
        let edges = detect_edges(
            &blurred,
            p.edges.low_threshold,
            p.edges.high_threshold,
            p.edges.aperture,
            p.edges.norm,
        )?;
        let ms = timings.record("edges", start);
        debug!("edges edge_px={} ms={:.3}", edges.count_nonzero(), ms);

        let start = Instant::now();
        let vertices = p.region.to_pixels(p.width, p.height);
        let region_mask = fill_convex_polygon(p.width, p.height, &vertices)?;
        let masked = apply_mask(&edges, &region_mask)?;
        let ms = timings.record("roi", start);
        debug!("roi masked_px={} ms={:.3}", masked.count_nonzero(), ms);

        let start = Instant::now();
        let segments = detect_segments(&masked, &p.hough)?;
        let ms = timings.record("hough", start);
        debug!("hough segments={} ms={:.3}", segments.len(), ms);

        let start = Instant::now();
        let estimate = fit_lanes(
            &segments,
            p.width,
            p.height,
            self.classifier.as_ref(),
            p.overlay.top_fraction,
        );
        let overlay = render_lanes(
            &estimate,
            p.width,
            p.height,
            p.overlay.color,
            p.overlay.thickness,
        )?;
        let ms = timings.record("lanes", start);
        debug!("lanes fitted={} ms={:.3}", estimate.lines().count(), ms);

        let start = Instant::now();
        let composite = add_weighted(
            &overlay,
            p.blend.alpha,
            &resized,
            p.blend.beta,
            p.blend.gamma,
        )?;
        let ms = timings.record("blend", start);
        debug!("blend ms={:.3}", ms);

        timings.total_ms = elapsed_ms(total_start);
        debug!("pipeline total_ms={:.3}", timings.total_ms);

        let trace = PipelineTrace {
            resized,
            gray,
            blurred,
            edges,
            region_mask,
            masked,
            overlay,
        };
        Ok((
            LaneDetection {
                segments,
                estimate,
                composite,
                timings,
            },
            trace,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;
    use crate::lanes::SlopeClassifier;

    #[test]
    fn invalid_params_rejected_at_construction() {
        let mut params = LaneParams::default();
        params.edges.aperture = 4;
        assert!(matches!(
            LaneDetector::new(params),
            Err(LaneError::InvalidParameter { stage: "edges", .. })
        ));
    }

    #[test]
    fn blank_image_gives_no_lanes_and_dimmed_composite() {
        let params = LaneParams {
            width: 64,
            height: 48,
            ..LaneParams::default()
        };
        let detector = LaneDetector::new(params).unwrap();
        let mut img = ImageU8::rgb(64, 48);
        img.data.fill(100);
        let det = detector.process(&img).unwrap();
        assert!(det.segments.is_empty());
        assert!(det.estimate.left.is_err() && det.estimate.right.is_err());
        let c = &det.composite;
        assert_eq!((c.w, c.h, c.channels), (64, 48, 3));
        assert!(c.data.iter().all(|&v| v == 80));
        let labels = [
            "resize",
            "grayscale",
            "blur",
            "edges",
            "roi",
            "hough",
            "lanes",
            "blend",
        ];
        for label in labels {
            assert!(det.timings.stage(label).is_some(), "missing {label}");
        }
    }

    #[test]
    fn diagnostics_carry_every_stage() {
        let params = LaneParams {
            width: 32,
            height: 24,
            ..LaneParams::default()
        };
        let detector = LaneDetector::new(params)
            .unwrap()
            .with_classifier(Box::new(SlopeClassifier));
        let img = ImageU8::rgb(32, 24);
        let diag = detector.process_with_diagnostics(&img).unwrap();
        let t = &diag.trace;
        for stage in [&t.gray, &t.blurred, &t.edges, &t.region_mask, &t.masked] {
            assert_eq!((stage.w, stage.h, stage.channels), (32, 24, 1));
        }
        assert_eq!(t.overlay.channels, 3);
        assert!(t.region_mask.count_nonzero() > 0);
        assert_eq!(diag.report.classifier, "slope");
        assert_eq!(detector.params().width, 32);
        assert_eq!(diag.report.timings, diag.detection.timings);
        let timings = &diag.report.timings;
        let stage_sum: f64 = timings.stages.iter().map(|s| s.elapsed_ms).sum();
        assert!(stage_sum <= timings.total_ms);
        assert!(timings.stage("region_mask").is_none());
        assert!(!diag.report.left.found());
        assert!(diag.report.left.error.is_some());
    }

    #[test]
    fn empty_input_is_invalid() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        assert!(detector.process(&ImageU8::rgb(0, 0)).is_err());
    }

    #[test]
    fn batch_preserves_order() {
        let params = LaneParams {
            width: 16,
            height: 12,
            ..LaneParams::default()
        };
        let detector = LaneDetector::new(params).unwrap();
        let images = vec![ImageU8::rgb(20, 10), ImageU8::rgb(0, 0), ImageU8::rgb(8, 8)];
        let results = detector.process_batch(&images);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
