use crate::detector::LaneParams;
use crate::error::{LaneError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LaneToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub pipeline: LaneParams,
    pub output: LaneOutputConfig,
}

/// Output paths; only `composite` is required.
#[derive(Debug, Deserialize)]
pub struct LaneOutputConfig {
    pub composite: PathBuf,
    #[serde(default)]
    pub resized: Option<PathBuf>,
    #[serde(default)]
    pub gray: Option<PathBuf>,
    #[serde(default)]
    pub blurred: Option<PathBuf>,
    #[serde(default)]
    pub edges: Option<PathBuf>,
    #[serde(default)]
    pub region_mask: Option<PathBuf>,
    #[serde(default)]
    pub masked: Option<PathBuf>,
    #[serde(default)]
    pub overlay: Option<PathBuf>,
    /// 3×2 grid of the main stages next to the composite.
    #[serde(default)]
    pub mosaic: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl LaneOutputConfig {
    /// True when any intermediate stage image is requested.
    pub fn wants_trace(&self) -> bool {
        [
            &self.resized,
            &self.gray,
            &self.blurred,
            &self.edges,
            &self.region_mask,
            &self.masked,
            &self.overlay,
        ]
        .iter()
        .any(|p| p.is_some())
    }
}

pub fn load_config(path: &Path) -> Result<LaneToolConfig> {
    let data = fs::read_to_string(path).map_err(|e| LaneError::config(path, e))?;
    serde_json::from_str(&data).map_err(|e| LaneError::config(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_default_pipeline() {
        let cfg: LaneToolConfig = serde_json::from_str(
            r#"{ "input": "road.jpg", "output": { "composite": "out.png" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.pipeline, LaneParams::default());
        assert_eq!(cfg.output.composite, PathBuf::from("out.png"));
        assert!(!cfg.output.wants_trace());
        assert!(cfg.output.report_json.is_none());
        assert!(cfg.output.mosaic.is_none());
    }

    #[test]
    fn bundled_example_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/lane_lines.json");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.pipeline, LaneParams::default());
        assert!(cfg.output.wants_trace());
        assert!(cfg.output.mosaic.is_some());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_config(Path::new("/nonexistent/lane_lines.json")).unwrap_err();
        assert!(matches!(err, LaneError::Config { .. }));
    }
}
