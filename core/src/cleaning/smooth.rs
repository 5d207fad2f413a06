use crate::math::stats::StatsHelper;
use crate::prelude::CleaningStage;
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;

/// Centered moving-average box filter over coordinates.
///
/// Windows at the sequence edges are clipped, not padded, so boundary
/// windows are asymmetric and smaller. Sequences shorter than the window,
/// and any window of 1, pass through unchanged.
pub struct SmoothStage {
    window: usize,
    logger: LogManager,
}

impl SmoothStage {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            logger: LogManager::new(),
        }
    }
}

impl CleaningStage for SmoothStage {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn apply(&self, samples: Vec<GazeSample>) -> Vec<GazeSample> {
        if self.window <= 1 || samples.len() < self.window {
            return samples;
        }

        let half = self.window / 2;
        let smoothed: Vec<GazeSample> = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let lo = i.saturating_sub(half);
                let hi = (i + half).min(samples.len() - 1);
                let xs: Vec<f32> = samples[lo..=hi].iter().map(|s| s.x).collect();
                let ys: Vec<f32> = samples[lo..=hi].iter().map(|s| s.y).collect();
                GazeSample {
                    x: StatsHelper::mean(&xs),
                    y: StatsHelper::mean(&ys),
                    smoothed: true,
                    ..sample.clone()
                }
            })
            .collect();

        self.logger.record(&format!(
            "SmoothStage window {} over {} samples",
            self.window,
            smoothed.len()
        ));
        smoothed
    }
}
