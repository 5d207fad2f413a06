use serde::{Deserialize, Serialize};

/// Tracker-reported validity of a single sample. Raw records without an
/// explicit flag are treated as valid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Valid,
    Invalid,
}

/// One gaze sample in screen-space pixel coordinates.
///
/// Raw samples arrive with only `timestamp`, `x`, `y` and optionally
/// `validity`/`pupil_size` populated; the cleaning stages fill in the
/// `interpolated`/`smoothed` markers and the kinematics pass annotates
/// `velocity`/`acceleration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    pub timestamp: i64,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub validity: Validity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pupil_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f32>,
    #[serde(default)]
    pub interpolated: bool,
    #[serde(default)]
    pub smoothed: bool,
}

impl GazeSample {
    pub fn new(timestamp: i64, x: f32, y: f32) -> Self {
        Self {
            timestamp,
            x,
            y,
            validity: Validity::Valid,
            pupil_size: None,
            velocity: None,
            acceleration: None,
            interpolated: false,
            smoothed: false,
        }
    }

    pub fn with_pupil(timestamp: i64, x: f32, y: f32, pupil_size: f32) -> Self {
        Self {
            pupil_size: Some(pupil_size),
            ..Self::new(timestamp, x, y)
        }
    }
}

/// Describes the recording context for an ingested or generated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub name: String,
    pub screen_width_px: u32,
    pub screen_height_px: u32,
    pub sample_rate_hz: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sample stream plus recording context, as handed to the pipeline driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPayload {
    pub samples: Vec<GazeSample>,
    pub info: SessionInfo,
}

impl SessionPayload {
    pub fn new(samples: Vec<GazeSample>, info: SessionInfo) -> Self {
        Self { samples, info }
    }
}
