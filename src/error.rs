//! Error type shared by every pipeline stage.
use crate::types::LaneSide;
use std::path::Path;

pub type Result<T> = std::result::Result<T, LaneError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LaneError {
    /// The input image could not be found or decoded.
    #[error("failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    /// An output image could not be encoded or written.
    #[error("failed to save {path}: {reason}")]
    ImageSave { path: String, reason: String },

    /// A tool configuration file could not be read or parsed.
    #[error("config {path}: {reason}")]
    Config { path: String, reason: String },

    /// A stage precondition was violated by a parameter or an input image.
    #[error("invalid parameter `{parameter}` for {stage}: {reason}")]
    InvalidParameter {
        stage: &'static str,
        parameter: &'static str,
        reason: String,
    },

    /// Too few classified samples (or a degenerate fit) for one lane side.
    #[error("insufficient samples for {side} lane: {samples} point(s)")]
    InsufficientSamples { side: LaneSide, samples: usize },
}

impl LaneError {
    pub fn invalid(
        stage: &'static str,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            stage,
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn image_load(path: &Path, reason: impl ToString) -> Self {
        Self::ImageLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn image_save(path: &Path, reason: impl ToString) -> Self {
        Self::ImageSave {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn config(path: &Path, reason: impl ToString) -> Self {
        Self::Config {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for the per-side failure that the pipeline recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientSamples { .. })
    }
}
