use lane_finder::config::{load_config, LaneToolConfig};
use lane_finder::diagnostics::stage_mosaic;
use lane_finder::image::io::{load_color_image, save_image, write_json_file};
use lane_finder::image::ImageU8;
use lane_finder::{LaneDetector, LaneError};
use log::info;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    run_with_config(&config).map_err(|e| e.to_string())
}

fn run_with_config(config: &LaneToolConfig) -> Result<(), LaneError> {
    let image = load_color_image(&config.input)?;
    let detector = LaneDetector::new(config.pipeline.clone())?;
    let params = detector.params();
    info!(
        "processing {} ({}x{}) at {}x{} with {} classifier",
        config.input.display(),
        image.w,
        image.h,
        params.width,
        params.height,
        detector.classifier().name()
    );
    let out = &config.output;

    let diag = detector.process_with_diagnostics(&image)?;
    save_image(&diag.detection.composite, &out.composite)?;

    let trace = &diag.trace;
    let stages: [(&Option<PathBuf>, &ImageU8); 7] = [
        (&out.resized, &trace.resized),
        (&out.gray, &trace.gray),
        (&out.blurred, &trace.blurred),
        (&out.edges, &trace.edges),
        (&out.region_mask, &trace.region_mask),
        (&out.masked, &trace.masked),
        (&out.overlay, &trace.overlay),
    ];
    for (path, img) in stages {
        if let Some(path) = path {
            save_image(img, path)?;
        }
    }
    if let Some(path) = &out.mosaic {
        save_image(&stage_mosaic(trace, &diag.detection.composite)?, path)?;
    }
    if let Some(path) = &out.report_json {
        write_json_file(path, &diag.report)?;
    }

    let report = &diag.report;
    println!(
        "segments={} left={} right={} latency_ms={:.3}",
        report.segments.len(),
        report.left.found(),
        report.right.found(),
        report.timings.total_ms
    );
    info!("composite written to {}", out.composite.display());
    Ok(())
}

fn usage() -> String {
    "Usage: lane_lines <config.json>".to_string()
}
