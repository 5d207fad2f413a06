use anyhow::Context;
use gazecore::prelude::PipelineConfig;
use gazecore::session::metrics::AoiRegion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pipeline options as loaded from a workflow YAML file or CLI arguments.
/// Unspecified fields fall back to the core defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub remove_outliers: bool,
    pub outlier_threshold_std_dev: f32,
    pub smoothing_window: usize,
    pub fill_gaps: bool,
    pub max_gap_size: u32,
    pub fixation_min_duration_ms: i64,
    pub saccade_velocity_threshold: f32,
    pub aoi_regions: Option<Vec<AoiRegion>>,
    pub extract_pupil_metrics: bool,
    pub velocity_lag_window: usize,
    pub acceleration_lag_window: usize,
    pub degrees_per_pixel: f32,
    pub pupil_baseline_window: usize,
    pub pupil_dilation_threshold: f32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            remove_outliers: defaults.remove_outliers,
            outlier_threshold_std_dev: defaults.outlier_threshold_std_dev,
            smoothing_window: defaults.smoothing_window,
            fill_gaps: defaults.fill_gaps,
            max_gap_size: defaults.max_gap_size,
            fixation_min_duration_ms: defaults.fixation_min_duration_ms,
            saccade_velocity_threshold: defaults.saccade_velocity_threshold,
            aoi_regions: defaults.aoi_regions,
            extract_pupil_metrics: defaults.extract_pupil_metrics,
            velocity_lag_window: defaults.velocity_lag_window,
            acceleration_lag_window: defaults.acceleration_lag_window,
            degrees_per_pixel: defaults.degrees_per_pixel,
            pupil_baseline_window: defaults.pupil_baseline_window,
            pupil_dilation_threshold: defaults.pupil_dilation_threshold,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(fixation_min_duration_ms: i64, saccade_velocity_threshold: f32) -> Self {
        Self {
            fixation_min_duration_ms,
            saccade_velocity_threshold,
            ..Default::default()
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            remove_outliers: self.remove_outliers,
            outlier_threshold_std_dev: self.outlier_threshold_std_dev,
            smoothing_window: self.smoothing_window,
            fill_gaps: self.fill_gaps,
            max_gap_size: self.max_gap_size,
            fixation_min_duration_ms: self.fixation_min_duration_ms,
            saccade_velocity_threshold: self.saccade_velocity_threshold,
            aoi_regions: self.aoi_regions.clone(),
            extract_pupil_metrics: self.extract_pupil_metrics,
            velocity_lag_window: self.velocity_lag_window,
            acceleration_lag_window: self.acceleration_lag_window,
            degrees_per_pixel: self.degrees_per_pixel,
            pupil_baseline_window: self.pupil_baseline_window,
            pupil_dilation_threshold: self.pupil_dilation_threshold,
        }
    }
}
