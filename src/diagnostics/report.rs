use super::timing::TimingBreakdown;
use crate::error::Result;
use crate::types::{LaneLine, LaneSide, LineSegment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub working_width: usize,
    pub working_height: usize,
}

/// Outcome for one lane side; exactly one of `line` and `error` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideReport {
    pub side: LaneSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LaneLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SideReport {
    pub fn from_result(side: LaneSide, result: &Result<LaneLine>) -> Self {
        match result {
            Ok(line) => Self {
                side,
                line: Some(line.clone()),
                error: None,
            },
            Err(err) => Self {
                side,
                line: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn found(&self) -> bool {
        self.line.is_some()
    }
}

/// JSON-friendly summary of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub input: InputDescriptor,
    pub classifier: String,
    pub edge_pixels: usize,
    pub masked_edge_pixels: usize,
    pub segments: Vec<LineSegment>,
    pub left: SideReport,
    pub right: SideReport,
    pub timings: TimingBreakdown,
}
