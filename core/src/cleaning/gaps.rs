use crate::math::stats::StatsHelper;
use crate::prelude::CleaningStage;
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;

/// Expected sampling interval when fewer than 2 samples exist to estimate
/// one (nominal 30 Hz recording).
const FALLBACK_INTERVAL_MS: f64 = 33.0;

/// Reconstructs short dropouts by linear interpolation.
///
/// The expected interval is the median of consecutive timestamp deltas;
/// gaps wider than `median * max_gap_size` are left untouched.
pub struct GapFillStage {
    max_gap_size: u32,
    logger: LogManager,
}

impl GapFillStage {
    pub fn new(max_gap_size: u32) -> Self {
        Self {
            max_gap_size,
            logger: LogManager::new(),
        }
    }

    fn expected_interval(samples: &[GazeSample]) -> f64 {
        if samples.len() < 2 {
            return FALLBACK_INTERVAL_MS;
        }
        let deltas: Vec<i64> = samples
            .windows(2)
            .map(|pair| pair[1].timestamp - pair[0].timestamp)
            .collect();
        StatsHelper::median(&deltas)
    }

    fn interpolate(prev: &GazeSample, curr: &GazeSample, ratio: f32, timestamp: i64) -> GazeSample {
        let pupil_size = match (prev.pupil_size, curr.pupil_size) {
            (Some(a), Some(b)) => Some(a + (b - a) * ratio),
            _ => None,
        };
        GazeSample {
            timestamp,
            x: prev.x + (curr.x - prev.x) * ratio,
            y: prev.y + (curr.y - prev.y) * ratio,
            validity: prev.validity,
            pupil_size,
            velocity: None,
            acceleration: None,
            interpolated: true,
            smoothed: false,
        }
    }
}

impl CleaningStage for GapFillStage {
    fn name(&self) -> &'static str {
        "gap_fill"
    }

    fn apply(&self, samples: Vec<GazeSample>) -> Vec<GazeSample> {
        if samples.len() < 2 {
            return samples;
        }

        let interval = Self::expected_interval(&samples);
        if interval <= 0.0 {
            return samples;
        }
        let max_gap_ms = interval * self.max_gap_size as f64;

        let mut filled: Vec<GazeSample> = Vec::with_capacity(samples.len());
        let mut generated = 0usize;
        for pair in samples.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            filled.push(prev.clone());

            let delta = (curr.timestamp - prev.timestamp) as f64;
            if delta > max_gap_ms {
                continue;
            }
            let missing = (delta / interval).round() as i64 - 1;
            if missing <= 0 {
                continue;
            }
            for j in 1..=missing {
                let fraction = j as f64 / (missing + 1) as f64;
                let timestamp = prev.timestamp + (delta * fraction).round() as i64;
                filled.push(Self::interpolate(prev, curr, fraction as f32, timestamp));
                generated += 1;
            }
        }
        if let Some(last) = samples.last() {
            filled.push(last.clone());
        }

        if generated > 0 {
            self.logger
                .record(&format!("GapFillStage generated {} samples", generated));
        }
        filled
    }
}
