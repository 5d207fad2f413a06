use crate::session::events::Fixation;
use crate::session::metrics::{AoiMetrics, AoiRegion};
use crate::telemetry::log::LogManager;
use std::collections::BTreeMap;

/// Label applied to fixations whose centroid matches no configured region.
pub const OUTSIDE_LABEL: &str = "outside";

/// Attributes fixations to rectangular regions and aggregates dwell
/// statistics. Region order matters: the first containing region wins when
/// rectangles overlap.
pub struct AoiAnalyzer {
    regions: Vec<AoiRegion>,
    logger: LogManager,
}

impl AoiAnalyzer {
    pub fn new(regions: Vec<AoiRegion>) -> Self {
        Self {
            regions,
            logger: LogManager::new(),
        }
    }

    fn label_for(&self, fixation: &Fixation) -> String {
        self.regions
            .iter()
            .find(|r| r.contains(fixation.centroid_x, fixation.centroid_y))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| OUTSIDE_LABEL.to_string())
    }

    /// Returns the relabeled fixation list and the per-region metrics map.
    /// Every configured region appears in the map, with or without hits;
    /// only true regions report a time to first fixation.
    pub fn analyze(&self, fixations: &[Fixation]) -> (Vec<Fixation>, BTreeMap<String, AoiMetrics>) {
        let mut metrics: BTreeMap<String, AoiMetrics> = BTreeMap::new();
        for region in &self.regions {
            metrics.insert(region.name.clone(), AoiMetrics::default());
        }
        metrics.insert(OUTSIDE_LABEL.to_string(), AoiMetrics::default());

        let mut labeled = Vec::with_capacity(fixations.len());
        for fixation in fixations {
            let label = self.label_for(fixation);
            let entry = metrics.entry(label.clone()).or_default();
            entry.fixation_count += 1;
            entry.total_dwell_time_ms += fixation.duration;
            if label != OUTSIDE_LABEL {
                entry.time_to_first_fixation_ms = Some(
                    entry
                        .time_to_first_fixation_ms
                        .map_or(fixation.start_time, |t| t.min(fixation.start_time)),
                );
            }
            labeled.push(Fixation {
                aoi_label: Some(label),
                ..fixation.clone()
            });
        }

        for entry in metrics.values_mut() {
            entry.mean_dwell_time_ms = if entry.fixation_count > 0 {
                entry.total_dwell_time_ms as f32 / entry.fixation_count as f32
            } else {
                0.0
            };
        }

        self.logger.record(&format!(
            "AoiAnalyzer attributed {} fixations across {} regions",
            fixations.len(),
            self.regions.len()
        ));
        (labeled, metrics)
    }
}
