use anyhow::Context;
use gazecore::session::sample::{GazeSample, SessionInfo, SessionPayload};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic gaze session.
///
/// The generated stream alternates stationary clusters (fixations) with
/// fast linear transitions (saccades); every `blink_every`-th cluster is
/// followed by a short zero-pupil run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub fixation_points: usize,
    pub samples_per_fixation: usize,
    pub transition_samples: usize,
    pub sample_interval_ms: i64,
    pub noise_px: f32,
    pub blink_every: usize,
    pub blink_samples: usize,
    pub pupil_base: f32,
    pub screen_width_px: u32,
    pub screen_height_px: u32,
    pub seed: u64,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fixation_points: 5,
            samples_per_fixation: 15,
            transition_samples: 8,
            sample_interval_ms: 33,
            noise_px: 2.0,
            blink_every: 3,
            blink_samples: 5,
            pupil_base: 3.0,
            screen_width_px: 1920,
            screen_height_px: 1080,
            seed: 0,
            description: None,
        }
    }
}

impl GeneratorConfig {
    fn normalized_points(&self) -> usize {
        self.fixation_points.max(1)
    }

    fn normalized_cluster(&self) -> usize {
        self.samples_per_fixation.max(1)
    }

    /// Number of samples a build will emit, before any generation happens.
    pub fn expected_sample_count(&self) -> anyhow::Result<usize> {
        let points = self.normalized_points();
        let clusters = points
            .checked_mul(self.normalized_cluster())
            .context("overflow computing cluster sample count")?;
        let transitions = (points - 1)
            .checked_mul(self.transition_samples)
            .context("overflow computing transition sample count")?;
        let blinks = if self.blink_every > 0 {
            ((points - 1) / self.blink_every) * self.blink_samples
        } else {
            0
        };
        Ok(clusters + transitions + blinks)
    }
}

struct SampleWriter {
    samples: Vec<GazeSample>,
    clock_ms: i64,
    interval_ms: i64,
}

impl SampleWriter {
    fn push(&mut self, x: f32, y: f32, pupil: f32) {
        self.samples
            .push(GazeSample::with_pupil(self.clock_ms, x, y, pupil));
        self.clock_ms += self.interval_ms;
    }
}

fn build_sample_stream(config: &GeneratorConfig) -> anyhow::Result<Vec<GazeSample>> {
    let points = config.normalized_points();
    let cluster_len = config.normalized_cluster();
    let expected = config.expected_sample_count()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let margin = 100.0f32;
    let targets: Vec<(f32, f32)> = (0..points)
        .map(|_| {
            (
                rng.gen_range(margin..config.screen_width_px as f32 - margin),
                rng.gen_range(margin..config.screen_height_px as f32 - margin),
            )
        })
        .collect();

    let mut writer = SampleWriter {
        samples: Vec::with_capacity(expected),
        clock_ms: 0,
        interval_ms: config.sample_interval_ms.max(1),
    };

    for (index, &(cx, cy)) in targets.iter().enumerate() {
        for _ in 0..cluster_len {
            let (jx, jy) = if config.noise_px > 0.0 {
                (
                    rng.gen_range(-config.noise_px..config.noise_px),
                    rng.gen_range(-config.noise_px..config.noise_px),
                )
            } else {
                (0.0, 0.0)
            };
            let pupil = config.pupil_base + rng.gen_range(-0.1..0.1f32);
            writer.push(cx + jx, cy + jy, pupil);
        }

        if index + 1 == targets.len() {
            break;
        }

        if config.blink_every > 0 && (index + 1) % config.blink_every == 0 {
            for _ in 0..config.blink_samples {
                writer.push(cx, cy, 0.0);
            }
        }

        let (nx, ny) = targets[index + 1];
        for step in 1..=config.transition_samples {
            let fraction = step as f32 / (config.transition_samples + 1) as f32;
            let pupil = config.pupil_base + rng.gen_range(-0.1..0.1f32);
            writer.push(cx + (nx - cx) * fraction, cy + (ny - cy) * fraction, pupil);
        }
    }

    Ok(writer.samples)
}

pub fn build_session_payload_from_config(
    config: &GeneratorConfig,
) -> anyhow::Result<SessionPayload> {
    let samples = build_sample_stream(config)?;
    let info = SessionInfo {
        name: format!("synthetic-{}", config.seed),
        screen_width_px: config.screen_width_px,
        screen_height_px: config.screen_height_px,
        sample_rate_hz: 1000.0 / config.sample_interval_ms.max(1) as f32,
        description: config.description.clone(),
    };
    Ok(SessionPayload::new(samples, info))
}

pub fn build_session_payload(
    fixation_points: usize,
    samples_per_fixation: usize,
    seed: u64,
) -> anyhow::Result<SessionPayload> {
    let config = GeneratorConfig {
        fixation_points,
        samples_per_fixation,
        seed,
        ..Default::default()
    };
    build_session_payload_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_expected_sample_count() {
        let config = GeneratorConfig::default();
        let payload = build_session_payload_from_config(&config).unwrap();
        assert_eq!(payload.samples.len(), config.expected_sample_count().unwrap());
        assert_eq!(payload.info.screen_width_px, 1920);
    }

    #[test]
    fn generator_is_deterministic_under_a_fixed_seed() {
        let config = GeneratorConfig {
            seed: 13,
            ..Default::default()
        };
        let first = build_session_payload_from_config(&config).unwrap();
        let second = build_session_payload_from_config(&config).unwrap();
        assert_eq!(first.samples, second.samples);
    }

    #[test]
    fn timestamps_advance_by_the_configured_interval() {
        let payload = build_session_payload(3, 4, 7).unwrap();
        assert!(payload
            .samples
            .windows(2)
            .all(|p| p[1].timestamp - p[0].timestamp == 33));
    }

    #[test]
    fn blink_runs_carry_zero_pupil() {
        let config = GeneratorConfig {
            blink_every: 1,
            ..Default::default()
        };
        let payload = build_session_payload_from_config(&config).unwrap();
        assert!(payload
            .samples
            .iter()
            .any(|s| s.pupil_size == Some(0.0)));
    }
}
