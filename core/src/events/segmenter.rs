use crate::math::stats::StatsHelper;
use crate::session::events::{Blink, Fixation, Saccade};
use crate::session::sample::{GazeSample, Validity};
use crate::telemetry::log::LogManager;

/// Events extracted from one velocity-annotated sequence.
#[derive(Debug, Clone, Default)]
pub struct SegmentedEvents {
    pub fixations: Vec<Fixation>,
    pub saccades: Vec<Saccade>,
    pub blinks: Vec<Blink>,
}

/// Velocity-threshold segmentation.
///
/// A two-state machine collects sub-threshold runs and finalizes each as a
/// Fixation when it meets the minimum duration; saccades are derived
/// afterwards from the spans between retained fixations. Blink runs are
/// found independently of the state machine.
pub struct EventSegmenter {
    velocity_threshold: f32,
    fixation_min_duration_ms: i64,
    degrees_per_pixel: f32,
    logger: LogManager,
}

impl EventSegmenter {
    pub fn new(
        velocity_threshold: f32,
        fixation_min_duration_ms: i64,
        degrees_per_pixel: f32,
    ) -> Self {
        Self {
            velocity_threshold,
            fixation_min_duration_ms,
            degrees_per_pixel,
            logger: LogManager::new(),
        }
    }

    pub fn segment(&self, samples: &[GazeSample]) -> SegmentedEvents {
        let fixations = self.collect_fixations(samples);
        let saccades = self.derive_saccades(samples, &fixations);
        let blinks = Self::collect_blinks(samples);

        self.logger.record(&format!(
            "EventSegmenter fixations {} saccades {} blinks {}",
            fixations.len(),
            saccades.len(),
            blinks.len()
        ));

        SegmentedEvents {
            fixations,
            saccades,
            blinks,
        }
    }

    fn collect_fixations(&self, samples: &[GazeSample]) -> Vec<Fixation> {
        let mut fixations = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, sample) in samples.iter().enumerate() {
            let velocity = sample.velocity.unwrap_or(0.0);
            match run_start {
                None => {
                    if velocity < self.velocity_threshold {
                        run_start = Some(i);
                    }
                }
                Some(start) => {
                    if velocity >= self.velocity_threshold {
                        if let Some(fixation) = self.finalize_run(samples, start, i - 1) {
                            fixations.push(fixation);
                        }
                        run_start = None;
                    }
                }
            }
        }
        if let Some(start) = run_start {
            if let Some(fixation) = self.finalize_run(samples, start, samples.len() - 1) {
                fixations.push(fixation);
            }
        }
        fixations
    }

    /// Finalize-or-discard: runs shorter than the minimum duration vanish.
    fn finalize_run(&self, samples: &[GazeSample], start: usize, end: usize) -> Option<Fixation> {
        let run = &samples[start..=end];
        let start_time = run[0].timestamp;
        let end_time = run[run.len() - 1].timestamp;
        let duration = end_time - start_time;
        if duration < self.fixation_min_duration_ms {
            return None;
        }

        let xs: Vec<f32> = run.iter().map(|s| s.x).collect();
        let ys: Vec<f32> = run.iter().map(|s| s.y).collect();

        // Direct all-pairs scan; runs are bounded by fixation duration and
        // sample rate, so k stays small.
        let mut dispersion = 0.0f32;
        for i in 0..run.len() {
            for j in (i + 1)..run.len() {
                let d = StatsHelper::distance(run[i].x, run[i].y, run[j].x, run[j].y);
                dispersion = dispersion.max(d);
            }
        }

        Some(Fixation {
            start_time,
            end_time,
            duration,
            centroid_x: StatsHelper::mean(&xs),
            centroid_y: StatsHelper::mean(&ys),
            dispersion,
            aoi_label: None,
            start_index: start,
            end_index: end,
        })
    }

    /// A saccade joins consecutive retained fixations when at least one
    /// sample in the inclusive boundary span crosses the velocity threshold.
    fn derive_saccades(&self, samples: &[GazeSample], fixations: &[Fixation]) -> Vec<Saccade> {
        let mut saccades = Vec::new();
        for pair in fixations.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let span = &samples[from.end_index..=to.start_index];
            let peak_velocity = span
                .iter()
                .map(|s| s.velocity.unwrap_or(0.0))
                .fold(0.0f32, f32::max);
            if peak_velocity < self.velocity_threshold {
                continue;
            }

            let amplitude_deg = StatsHelper::distance(
                from.centroid_x,
                from.centroid_y,
                to.centroid_x,
                to.centroid_y,
            ) * self.degrees_per_pixel;

            saccades.push(Saccade {
                start_time: from.end_time,
                end_time: to.start_time,
                duration: to.start_time - from.end_time,
                start_x: from.centroid_x,
                start_y: from.centroid_y,
                end_x: to.centroid_x,
                end_y: to.centroid_y,
                amplitude_deg,
                peak_velocity,
            });
        }
        saccades
    }

    fn is_blink_sample(sample: &GazeSample) -> bool {
        sample.validity == Validity::Invalid || sample.pupil_size.map_or(true, |p| p == 0.0)
    }

    fn collect_blinks(samples: &[GazeSample]) -> Vec<Blink> {
        let mut blinks = Vec::new();
        let mut run_start: Option<usize> = None;
        for (i, sample) in samples.iter().enumerate() {
            if Self::is_blink_sample(sample) {
                run_start.get_or_insert(i);
            } else if let Some(start) = run_start.take() {
                blinks.push(Blink::new(samples[start].timestamp, samples[i - 1].timestamp));
            }
        }
        if let Some(start) = run_start {
            blinks.push(Blink::new(
                samples[start].timestamp,
                samples[samples.len() - 1].timestamp,
            ));
        }
        blinks
    }
}
