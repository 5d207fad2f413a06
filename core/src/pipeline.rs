use crate::analysis::aoi::AoiAnalyzer;
use crate::analysis::pupil::PupilAnalyzer;
use crate::analysis::scanpath::ScanpathSummarizer;
use crate::cleaning::{GapFillStage, OutlierStage, SmoothStage, ValidateStage};
use crate::events::segmenter::EventSegmenter;
use crate::kinematics::VelocityAnnotator;
use crate::prelude::{CleaningStage, ConfigResult, PipelineConfig};
use crate::session::metrics::AnalysisResult;
use crate::session::sample::GazeSample;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// Chains the conditioning stages, kinematics annotation, segmentation and
/// derived-metric analyzers into one run over a session's samples.
///
/// Construction validates the configuration eagerly; `process` itself never
/// fails — degraded input produces the empty result and is only logged.
/// A pipeline holds no per-run state, so independent sessions may be
/// processed by concurrent pipelines without coordination.
pub struct Pipeline {
    config: PipelineConfig,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// (processed, degraded) run counters.
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    fn cleaning_stages(&self) -> Vec<Box<dyn CleaningStage>> {
        let mut stages: Vec<Box<dyn CleaningStage>> = vec![Box::new(ValidateStage::new())];
        if self.config.fill_gaps {
            stages.push(Box::new(GapFillStage::new(self.config.max_gap_size)));
        }
        if self.config.remove_outliers {
            stages.push(Box::new(OutlierStage::new(self.config.outlier_threshold_std_dev)));
        }
        stages.push(Box::new(SmoothStage::new(self.config.smoothing_window)));
        stages
    }

    pub fn process(&self, samples: Vec<GazeSample>) -> AnalysisResult {
        self.metrics.record_processed();

        let mut current = samples;
        for stage in self.cleaning_stages() {
            current = stage.apply(current);
        }
        if current.is_empty() {
            self.logger
                .record_degraded("Pipeline produced no cleaned samples");
            self.metrics.record_degraded();
            return AnalysisResult::empty();
        }

        let annotated = VelocityAnnotator::new(
            self.config.velocity_lag_window,
            self.config.acceleration_lag_window,
            self.config.degrees_per_pixel,
        )
        .annotate(current);

        let segmenter = EventSegmenter::new(
            self.config.saccade_velocity_threshold,
            self.config.fixation_min_duration_ms,
            self.config.degrees_per_pixel,
        );
        let events = segmenter.segment(&annotated);

        let (fixations, aoi_metrics) = match &self.config.aoi_regions {
            Some(regions) => {
                let (labeled, metrics) = AoiAnalyzer::new(regions.clone()).analyze(&events.fixations);
                (labeled, Some(metrics))
            }
            None => (events.fixations, None),
        };

        let pupil_metrics = if self.config.extract_pupil_metrics {
            PupilAnalyzer::new(
                self.config.pupil_baseline_window,
                self.config.pupil_dilation_threshold,
            )
            .analyze(&annotated)
        } else {
            None
        };

        let scanpath_metrics = ScanpathSummarizer::new().summarize(&fixations, &events.saccades);

        let total_duration_ms =
            annotated[annotated.len() - 1].timestamp - annotated[0].timestamp;
        let sample_count = annotated.len();

        AnalysisResult {
            cleaned_samples: annotated,
            fixations,
            saccades: events.saccades,
            blinks: events.blinks,
            aoi_metrics,
            pupil_metrics,
            scanpath_metrics,
            total_duration_ms,
            sample_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::metrics::AoiRegion;
    use crate::session::sample::Validity;

    fn cluster(x: f32, y: f32, start_ms: i64, count: usize) -> Vec<GazeSample> {
        (0..count)
            .map(|i| GazeSample::with_pupil(start_ms + i as i64 * 33, x, y, 3.0))
            .collect()
    }

    /// Two stationary clusters bridged by a fast linear ramp.
    fn two_cluster_session() -> Vec<GazeSample> {
        let mut samples = cluster(100.0, 100.0, 0, 16);
        for j in 1..=10 {
            samples.push(GazeSample::with_pupil(
                (15 + j) as i64 * 33,
                100.0 + j as f32 * 40.0,
                100.0,
                3.0,
            ));
        }
        samples.extend(cluster(500.0, 100.0, 26 * 33, 15));
        samples
    }

    #[test]
    fn cleaned_output_is_time_ordered_even_for_unsorted_input() {
        let mut samples = two_cluster_session();
        samples.reverse();
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let result = pipeline.process(samples);
        assert!(result
            .cleaned_samples
            .windows(2)
            .all(|p| p[0].timestamp <= p[1].timestamp));
        assert_eq!(result.sample_count, result.cleaned_samples.len());
    }

    #[test]
    fn rerunning_on_cleaned_output_is_a_fixpoint() {
        let first = Pipeline::new(PipelineConfig::default()).unwrap();
        let cleaned = first.process(two_cluster_session()).cleaned_samples;

        let config = PipelineConfig {
            remove_outliers: false,
            fill_gaps: false,
            smoothing_window: 1,
            ..Default::default()
        };
        let second = Pipeline::new(config).unwrap();
        let again = second.process(cleaned.clone()).cleaned_samples;
        assert_eq!(again, cleaned);
    }

    #[test]
    fn full_run_extracts_fixations_saccade_and_metrics() {
        let config = PipelineConfig {
            smoothing_window: 1,
            aoi_regions: Some(vec![
                AoiRegion::new("left", 0.0, 0.0, 300.0, 300.0),
                AoiRegion::new("right", 301.0, 0.0, 400.0, 300.0),
            ]),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let result = pipeline.process(two_cluster_session());

        assert_eq!(result.fixations.len(), 2);
        assert_eq!(result.saccades.len(), 1);
        assert_eq!(result.fixations[0].aoi_label.as_deref(), Some("left"));
        assert_eq!(result.fixations[1].aoi_label.as_deref(), Some("right"));

        let aoi = result.aoi_metrics.unwrap();
        assert_eq!(aoi["left"].fixation_count, 1);
        assert_eq!(aoi["right"].fixation_count, 1);
        assert_eq!(aoi["outside"].fixation_count, 0);

        assert!(result.pupil_metrics.is_some());
        assert_eq!(result.scanpath_metrics.fixation_count, 2);
        assert_eq!(result.scanpath_metrics.saccade_count, 1);
        assert!(result.scanpath_metrics.fixation_saccade_ratio > 0.0);
        assert_eq!(result.total_duration_ms, 40 * 33);
    }

    #[test]
    fn aoi_metrics_absent_without_configured_regions() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let result = pipeline.process(two_cluster_session());
        assert!(result.aoi_metrics.is_none());
    }

    #[test]
    fn pupil_metrics_respect_the_extraction_switch() {
        let config = PipelineConfig {
            extract_pupil_metrics: false,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let result = pipeline.process(two_cluster_session());
        assert!(result.pupil_metrics.is_none());
    }

    #[test]
    fn degraded_input_returns_empty_result_and_counts() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();

        let empty = pipeline.process(Vec::new());
        assert!(empty.cleaned_samples.is_empty());
        assert_eq!(empty.total_duration_ms, 0);

        let mut all_invalid = cluster(100.0, 100.0, 0, 5);
        for sample in &mut all_invalid {
            sample.validity = Validity::Invalid;
        }
        let result = pipeline.process(all_invalid);
        assert!(result.fixations.is_empty());
        assert_eq!(pipeline.metrics_snapshot(), (2, 2));
    }

    #[test]
    fn invalid_configuration_is_rejected_before_processing() {
        let config = PipelineConfig {
            degrees_per_pixel: 0.0,
            ..Default::default()
        };
        assert!(Pipeline::new(config).is_err());
    }
}
