use crate::session::events::{Fixation, Saccade};
use crate::session::metrics::ScanpathMetrics;
use crate::telemetry::log::LogManager;

/// Aggregates the fixation/saccade sequence into path-length and ratio
/// metrics. Empty fixation input yields the all-zero metrics object.
pub struct ScanpathSummarizer {
    logger: LogManager,
}

impl ScanpathSummarizer {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
        }
    }

    pub fn summarize(&self, fixations: &[Fixation], saccades: &[Saccade]) -> ScanpathMetrics {
        if fixations.is_empty() {
            return ScanpathMetrics::default();
        }

        let total_fixation_ms: i64 = fixations.iter().map(|f| f.duration).sum();
        let path_length_deg: f32 = saccades.iter().map(|s| s.amplitude_deg).sum();
        let scanpath_duration_ms =
            fixations[fixations.len() - 1].end_time - fixations[0].start_time;

        let mean_fixation_duration_ms = total_fixation_ms as f32 / fixations.len() as f32;
        let mean_saccade_amplitude_deg = if saccades.is_empty() {
            0.0
        } else {
            path_length_deg / saccades.len() as f32
        };
        let fixation_saccade_ratio = if scanpath_duration_ms > 0 {
            total_fixation_ms as f32 / scanpath_duration_ms as f32
        } else {
            0.0
        };

        self.logger.record(&format!(
            "ScanpathSummarizer path {:.2} deg over {} ms",
            path_length_deg, scanpath_duration_ms
        ));

        ScanpathMetrics {
            path_length_deg,
            fixation_count: fixations.len(),
            saccade_count: saccades.len(),
            mean_fixation_duration_ms,
            mean_saccade_amplitude_deg,
            scanpath_duration_ms,
            fixation_saccade_ratio,
        }
    }
}

impl Default for ScanpathSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixation(start: i64, end: i64) -> Fixation {
        Fixation {
            start_time: start,
            end_time: end,
            duration: end - start,
            centroid_x: 0.0,
            centroid_y: 0.0,
            dispersion: 0.0,
            aoi_label: None,
            start_index: 0,
            end_index: 0,
        }
    }

    fn saccade(start: i64, end: i64, amplitude_deg: f32) -> Saccade {
        Saccade {
            start_time: start,
            end_time: end,
            duration: end - start,
            start_x: 0.0,
            start_y: 0.0,
            end_x: 0.0,
            end_y: 0.0,
            amplitude_deg,
            peak_velocity: 60.0,
        }
    }

    #[test]
    fn aggregates_durations_and_amplitudes() {
        let fixations = vec![fixation(0, 400), fixation(600, 1000)];
        let saccades = vec![saccade(400, 600, 12.0)];
        let metrics = ScanpathSummarizer::new().summarize(&fixations, &saccades);

        assert_eq!(metrics.fixation_count, 2);
        assert_eq!(metrics.saccade_count, 1);
        assert_eq!(metrics.path_length_deg, 12.0);
        assert_eq!(metrics.mean_fixation_duration_ms, 400.0);
        assert_eq!(metrics.mean_saccade_amplitude_deg, 12.0);
        assert_eq!(metrics.scanpath_duration_ms, 1000);
        assert!((metrics.fixation_saccade_ratio - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_scanpath_guards_ratio_to_zero() {
        let fixations = vec![fixation(500, 500)];
        let metrics = ScanpathSummarizer::new().summarize(&fixations, &[]);
        assert_eq!(metrics.fixation_saccade_ratio, 0.0);
        assert!(metrics.fixation_saccade_ratio.is_finite());
    }

    #[test]
    fn empty_fixations_yield_all_zero_metrics() {
        let metrics = ScanpathSummarizer::new().summarize(&[], &[]);
        assert_eq!(metrics.fixation_count, 0);
        assert_eq!(metrics.path_length_deg, 0.0);
        assert_eq!(metrics.scanpath_duration_ms, 0);
    }
}
