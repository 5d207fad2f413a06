use crate::session::metrics::AoiRegion;
use crate::session::sample::GazeSample;
use serde::{Deserialize, Serialize};

/// Immutable configuration shared by every pipeline stage.
///
/// Constructed once, validated eagerly by [`crate::pipeline::Pipeline::new`],
/// and passed by reference into each stage; the pipeline never substitutes a
/// different value for an invalid one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub remove_outliers: bool,
    pub outlier_threshold_std_dev: f32,
    pub smoothing_window: usize,
    pub fill_gaps: bool,
    pub max_gap_size: u32,
    pub fixation_min_duration_ms: i64,
    /// Velocity threshold separating fixation from saccade samples, deg/s.
    pub saccade_velocity_threshold: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aoi_regions: Option<Vec<AoiRegion>>,
    pub extract_pupil_metrics: bool,
    pub velocity_lag_window: usize,
    pub acceleration_lag_window: usize,
    pub degrees_per_pixel: f32,
    pub pupil_baseline_window: usize,
    /// Relative pupil growth over baseline that counts as a dilation.
    pub pupil_dilation_threshold: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remove_outliers: true,
            outlier_threshold_std_dev: 2.5,
            smoothing_window: 5,
            fill_gaps: true,
            max_gap_size: 3,
            fixation_min_duration_ms: 100,
            saccade_velocity_threshold: 30.0,
            aoi_regions: None,
            extract_pupil_metrics: true,
            velocity_lag_window: 3,
            acceleration_lag_window: 5,
            degrees_per_pixel: 0.05,
            pupil_baseline_window: 20,
            pupil_dilation_threshold: 0.10,
        }
    }
}

impl PipelineConfig {
    /// Checks every recognized option before any data is processed.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.smoothing_window == 0 {
            return Err(ConfigError::InvalidWindow("smoothing_window must be >= 1".into()));
        }
        if self.velocity_lag_window == 0 {
            return Err(ConfigError::InvalidWindow(
                "velocity_lag_window must be >= 1".into(),
            ));
        }
        if self.acceleration_lag_window == 0 {
            return Err(ConfigError::InvalidWindow(
                "acceleration_lag_window must be >= 1".into(),
            ));
        }
        if self.pupil_baseline_window == 0 {
            return Err(ConfigError::InvalidWindow(
                "pupil_baseline_window must be >= 1".into(),
            ));
        }
        if self.max_gap_size == 0 {
            return Err(ConfigError::InvalidWindow("max_gap_size must be >= 1".into()));
        }
        if !(self.outlier_threshold_std_dev > 0.0) {
            return Err(ConfigError::InvalidThreshold(
                "outlier_threshold_std_dev must be > 0".into(),
            ));
        }
        if !(self.saccade_velocity_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(
                "saccade_velocity_threshold must be > 0".into(),
            ));
        }
        if !(self.pupil_dilation_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(
                "pupil_dilation_threshold must be > 0".into(),
            ));
        }
        if !(self.degrees_per_pixel > 0.0) {
            return Err(ConfigError::InvalidThreshold(
                "degrees_per_pixel must be > 0".into(),
            ));
        }
        if self.fixation_min_duration_ms <= 0 {
            return Err(ConfigError::InvalidThreshold(
                "fixation_min_duration_ms must be > 0".into(),
            ));
        }
        if let Some(regions) = &self.aoi_regions {
            for region in regions {
                if region.name.is_empty() {
                    return Err(ConfigError::InvalidRegion("region name must not be empty".into()));
                }
                if !(region.width >= 0.0 && region.height >= 0.0)
                    || !region.x.is_finite()
                    || !region.y.is_finite()
                {
                    return Err(ConfigError::InvalidRegion(format!(
                        "region '{}' has a malformed rectangle",
                        region.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Configuration rejected before any data was processed.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid window: {0}")]
    InvalidWindow(String),
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Trait describing the pure sample-conditioning stages.
///
/// A stage consumes one ordered sequence and returns a new one; degraded
/// input (empty or fully dropped) is passed through as the empty sequence,
/// never an error.
pub trait CleaningStage {
    fn name(&self) -> &'static str;
    fn apply(&self, samples: Vec<GazeSample>) -> Vec<GazeSample>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_windows_are_rejected() {
        let config = PipelineConfig {
            smoothing_window: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow(_))));
    }

    #[test]
    fn non_positive_thresholds_are_rejected() {
        let config = PipelineConfig {
            saccade_velocity_threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));

        let config = PipelineConfig {
            outlier_threshold_std_dev: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_region_rectangle_is_rejected() {
        let config = PipelineConfig {
            aoi_regions: Some(vec![AoiRegion::new("panel", f32::NAN, 0.0, 10.0, 10.0)]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRegion(_))));
    }
}
