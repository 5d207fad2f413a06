use serde::{Deserialize, Serialize};

/// A sustained sub-threshold-velocity run of samples.
///
/// `start_index`/`end_index` are the inclusive member range into the
/// velocity-annotated sequence the segmenter consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixation {
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
    pub centroid_x: f32,
    pub centroid_y: f32,
    pub dispersion: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoi_label: Option<String>,
    pub start_index: usize,
    pub end_index: usize,
}

/// A fast movement between two retained fixations. Endpoints are the
/// bounding fixations' centroids; amplitude is their distance in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saccade {
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub amplitude_deg: f32,
    pub peak_velocity: f32,
}

/// A maximal run of samples with invalid or pupil-absent data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blink {
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
}

impl Blink {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
            duration: end_time - start_time,
        }
    }
}
