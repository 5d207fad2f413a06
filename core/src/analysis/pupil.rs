use crate::math::stats::StatsHelper;
use crate::session::metrics::{DilationEvent, PupilMetrics};
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;

/// Pupil-size statistics and rolling-baseline dilation detection over the
/// cleaned sample sequence. Only sizes strictly above 0 count as valid.
pub struct PupilAnalyzer {
    baseline_window: usize,
    dilation_threshold: f32,
    logger: LogManager,
}

impl PupilAnalyzer {
    pub fn new(baseline_window: usize, dilation_threshold: f32) -> Self {
        Self {
            baseline_window,
            dilation_threshold,
            logger: LogManager::new(),
        }
    }

    fn valid_size(sample: &GazeSample) -> Option<f32> {
        sample.pupil_size.filter(|&p| p > 0.0)
    }

    /// `None` when the sequence carries no valid pupil sizes at all.
    pub fn analyze(&self, samples: &[GazeSample]) -> Option<PupilMetrics> {
        let sizes: Vec<f32> = samples.iter().filter_map(Self::valid_size).collect();
        if sizes.is_empty() {
            return None;
        }

        let mut dilation_events = Vec::new();
        for (i, sample) in samples.iter().enumerate().skip(self.baseline_window) {
            let current = match Self::valid_size(sample) {
                Some(size) => size,
                None => continue,
            };
            let window: Vec<f32> = samples[i - self.baseline_window..i]
                .iter()
                .filter_map(Self::valid_size)
                .collect();
            if window.is_empty() {
                continue;
            }
            let baseline = StatsHelper::mean(&window);
            if baseline <= 0.0 {
                continue;
            }
            let change = (current - baseline) / baseline;
            if change > self.dilation_threshold {
                dilation_events.push(DilationEvent {
                    index: i,
                    timestamp: sample.timestamp,
                    baseline,
                    pupil_size: current,
                    percent_change: change * 100.0,
                });
            }
        }

        self.logger.record(&format!(
            "PupilAnalyzer {} valid samples, {} dilation events",
            sizes.len(),
            dilation_events.len()
        ));

        let min = sizes.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = sizes.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        Some(PupilMetrics {
            mean: StatsHelper::mean(&sizes),
            std_dev: StatsHelper::population_std_dev(&sizes),
            min,
            max,
            dilation_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(sizes: &[f32]) -> Vec<GazeSample> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &p)| GazeSample::with_pupil(i as i64 * 33, 400.0, 300.0, p))
            .collect()
    }

    #[test]
    fn summary_statistics_cover_valid_sizes_only() {
        let mut samples = series(&[3.0, 3.2, 2.8, 3.0]);
        samples.push(GazeSample::new(132, 400.0, 300.0));
        samples.push(GazeSample::with_pupil(165, 400.0, 300.0, 0.0));

        let metrics = PupilAnalyzer::new(2, 0.10).analyze(&samples).unwrap();
        assert!((metrics.mean - 3.0).abs() < 1e-4);
        assert_eq!(metrics.min, 2.8);
        assert_eq!(metrics.max, 3.2);
    }

    #[test]
    fn dilation_above_rolling_baseline_is_detected() {
        // Flat 3.0 baseline, then a jump to 3.6 (+20% over baseline).
        let mut sizes = vec![3.0; 20];
        sizes.push(3.6);
        sizes.extend(vec![3.0; 3]);
        let samples = series(&sizes);

        let metrics = PupilAnalyzer::new(20, 0.10).analyze(&samples).unwrap();
        assert_eq!(metrics.dilation_events.len(), 1);
        let event = &metrics.dilation_events[0];
        assert_eq!(event.index, 20);
        assert_eq!(event.timestamp, 20 * 33);
        assert!((event.baseline - 3.0).abs() < 1e-4);
        assert!((event.percent_change - 20.0).abs() < 0.1);
    }

    #[test]
    fn steady_series_produces_no_events() {
        let metrics = PupilAnalyzer::new(5, 0.10).analyze(&series(&[3.0; 30])).unwrap();
        assert!(metrics.dilation_events.is_empty());
    }

    #[test]
    fn absent_pupil_data_yields_none() {
        let samples: Vec<GazeSample> = (0..10)
            .map(|i| GazeSample::new(i as i64 * 33, 400.0, 300.0))
            .collect();
        assert!(PupilAnalyzer::new(5, 0.10).analyze(&samples).is_none());
    }
}
