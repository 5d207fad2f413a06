use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use gazecore::pipeline::Pipeline;
use gazecore::session::metrics::{AnalysisResult, ScanpathMetrics};
use gazecore::session::sample::SessionPayload;
use serde::Serialize;

/// Flattened per-run summary written to the offline report.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub session: String,
    pub sample_count: usize,
    pub total_duration_ms: i64,
    pub fixation_count: usize,
    pub saccade_count: usize,
    pub blink_count: usize,
    pub dilation_event_count: usize,
    pub scanpath: ScanpathMetrics,
    #[serde(skip)]
    pub analysis: AnalysisResult,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, payload: &SessionPayload) -> anyhow::Result<WorkflowResult> {
        let pipeline = Pipeline::new(self.config.to_pipeline_config())
            .context("configuring analysis pipeline")?;
        let analysis = pipeline.process(payload.samples.clone());
        log::info!(
            "session {}: {} cleaned samples, {} fixations, {} saccades",
            payload.info.name,
            analysis.sample_count,
            analysis.fixations.len(),
            analysis.saccades.len()
        );

        Ok(WorkflowResult {
            session: payload.info.name.clone(),
            sample_count: analysis.sample_count,
            total_duration_ms: analysis.total_duration_ms,
            fixation_count: analysis.fixations.len(),
            saccade_count: analysis.saccades.len(),
            blink_count: analysis.blinks.len(),
            dilation_event_count: analysis
                .pupil_metrics
                .as_ref()
                .map_or(0, |m| m.dilation_events.len()),
            scanpath: analysis.scanpath_metrics.clone(),
            analysis,
        })
    }
}
