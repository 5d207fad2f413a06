use crate::session::events::{Blink, Fixation, Saccade};
use crate::session::sample::GazeSample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied rectangular area of interest, immutable for the run.
/// Containment is inclusive on all four edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AoiRegion {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AoiRegion {
    pub fn new(name: &str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Dwell statistics for one region (or the synthetic "outside" bucket).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AoiMetrics {
    pub fixation_count: usize,
    pub total_dwell_time_ms: i64,
    pub mean_dwell_time_ms: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_first_fixation_ms: Option<i64>,
}

/// A pupil size excursion above the rolling baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilationEvent {
    pub index: usize,
    pub timestamp: i64,
    pub baseline: f32,
    pub pupil_size: f32,
    pub percent_change: f32,
}

/// Summary statistics over valid pupil sizes, plus detected dilations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PupilMetrics {
    pub mean: f32,
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    pub dilation_events: Vec<DilationEvent>,
}

/// Aggregate path statistics over the fixation/saccade sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanpathMetrics {
    pub path_length_deg: f32,
    pub fixation_count: usize,
    pub saccade_count: usize,
    pub mean_fixation_duration_ms: f32,
    pub mean_saccade_amplitude_deg: f32,
    pub scanpath_duration_ms: i64,
    pub fixation_saccade_ratio: f32,
}

/// Full output of one pipeline run over a session's samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub cleaned_samples: Vec<GazeSample>,
    pub fixations: Vec<Fixation>,
    pub saccades: Vec<Saccade>,
    pub blinks: Vec<Blink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoi_metrics: Option<BTreeMap<String, AoiMetrics>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pupil_metrics: Option<PupilMetrics>,
    pub scanpath_metrics: ScanpathMetrics,
    pub total_duration_ms: i64,
    pub sample_count: usize,
}

impl AnalysisResult {
    /// Structurally valid zero-valued result for degraded input.
    pub fn empty() -> Self {
        Self {
            cleaned_samples: Vec::new(),
            fixations: Vec::new(),
            saccades: Vec::new(),
            blinks: Vec::new(),
            aoi_metrics: None,
            pupil_metrics: None,
            scanpath_metrics: ScanpathMetrics::default(),
            total_duration_ms: 0,
            sample_count: 0,
        }
    }
}
