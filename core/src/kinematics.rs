use crate::math::stats::StatsHelper;
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;

/// Annotates each sample with angular velocity and acceleration from
/// backward-lag finite differences.
///
/// The first `velocity_lag` samples carry velocity 0 and the first
/// `acceleration_lag` samples carry acceleration 0 by convention; no
/// centered or forward difference is used.
pub struct VelocityAnnotator {
    velocity_lag: usize,
    acceleration_lag: usize,
    degrees_per_pixel: f32,
    logger: LogManager,
}

impl VelocityAnnotator {
    pub fn new(velocity_lag: usize, acceleration_lag: usize, degrees_per_pixel: f32) -> Self {
        Self {
            velocity_lag,
            acceleration_lag,
            degrees_per_pixel,
            logger: LogManager::new(),
        }
    }

    fn rate(delta: f32, t_from: i64, t_to: i64) -> f32 {
        let dt_s = (t_to - t_from) as f32 / 1000.0;
        if dt_s > 0.0 {
            delta / dt_s
        } else {
            0.0
        }
    }

    pub fn annotate(&self, samples: Vec<GazeSample>) -> Vec<GazeSample> {
        let velocities: Vec<f32> = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                if i < self.velocity_lag {
                    return 0.0;
                }
                let prev = &samples[i - self.velocity_lag];
                let degrees = StatsHelper::distance(prev.x, prev.y, sample.x, sample.y)
                    * self.degrees_per_pixel;
                Self::rate(degrees, prev.timestamp, sample.timestamp)
            })
            .collect();

        let accelerations: Vec<f32> = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                if i < self.acceleration_lag {
                    return 0.0;
                }
                let prev = &samples[i - self.acceleration_lag];
                Self::rate(
                    velocities[i] - velocities[i - self.acceleration_lag],
                    prev.timestamp,
                    sample.timestamp,
                )
            })
            .collect();

        let annotated: Vec<GazeSample> = samples
            .into_iter()
            .zip(velocities.iter().zip(accelerations.iter()))
            .map(|(sample, (&velocity, &acceleration))| GazeSample {
                velocity: Some(velocity),
                acceleration: Some(acceleration),
                ..sample
            })
            .collect();

        if let Some(peak) = velocities.iter().cloned().reduce(f32::max) {
            self.logger.record(&format!(
                "VelocityAnnotator peak {:.2} deg/s over {} samples",
                peak,
                annotated.len()
            ));
        }
        annotated
    }
}
