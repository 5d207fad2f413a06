use crate::math::stats::StatsHelper;
use crate::prelude::CleaningStage;
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;

/// Rejects samples whose x or y z-score exceeds the configured threshold.
/// Fewer than 3 samples pass through unchanged; statistics over such a
/// sequence would be meaningless.
pub struct OutlierStage {
    threshold_std_dev: f32,
    logger: LogManager,
}

impl OutlierStage {
    pub fn new(threshold_std_dev: f32) -> Self {
        Self {
            threshold_std_dev,
            logger: LogManager::new(),
        }
    }

    fn z_score(value: f32, mean: f32, std_dev: f32) -> f32 {
        if std_dev > 0.0 {
            (value - mean).abs() / std_dev
        } else {
            0.0
        }
    }
}

impl CleaningStage for OutlierStage {
    fn name(&self) -> &'static str {
        "outlier_filter"
    }

    fn apply(&self, samples: Vec<GazeSample>) -> Vec<GazeSample> {
        if samples.len() < 3 {
            return samples;
        }

        let xs: Vec<f32> = samples.iter().map(|s| s.x).collect();
        let ys: Vec<f32> = samples.iter().map(|s| s.y).collect();
        let (mean_x, std_x) = (StatsHelper::mean(&xs), StatsHelper::population_std_dev(&xs));
        let (mean_y, std_y) = (StatsHelper::mean(&ys), StatsHelper::population_std_dev(&ys));

        let total = samples.len();
        let kept: Vec<GazeSample> = samples
            .into_iter()
            .filter(|s| {
                Self::z_score(s.x, mean_x, std_x) <= self.threshold_std_dev
                    && Self::z_score(s.y, mean_y, std_y) <= self.threshold_std_dev
            })
            .collect();

        let dropped = total - kept.len();
        if dropped > 0 {
            self.logger.record(&format!(
                "OutlierStage dropped {} of {} samples",
                dropped, total
            ));
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_outlier_is_dropped_from_tight_cluster() {
        let mut samples: Vec<GazeSample> = (0..100)
            .map(|i| {
                let jitter = (i % 5) as f32;
                GazeSample::new(i as i64 * 33, 960.0 + jitter, 540.0 - jitter)
            })
            .collect();
        samples.push(GazeSample::new(3300, 5.0, 5.0));

        let out = OutlierStage::new(2.5).apply(samples);
        assert_eq!(out.len(), 100);
        assert!(out.iter().all(|s| s.x > 900.0));
    }

    #[test]
    fn identical_coordinates_survive_zero_std_dev() {
        let samples: Vec<GazeSample> = (0..10)
            .map(|i| GazeSample::new(i as i64 * 33, 400.0, 300.0))
            .collect();
        let out = OutlierStage::new(2.5).apply(samples);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn short_sequences_pass_through() {
        let samples = vec![GazeSample::new(0, 0.0, 0.0), GazeSample::new(33, 900.0, 900.0)];
        let out = OutlierStage::new(2.5).apply(samples);
        assert_eq!(out.len(), 2);
    }
}
