use crate::prelude::CleaningStage;
use crate::session::sample::{GazeSample, Validity};
use crate::telemetry::log::LogManager;

/// Entry stage: drops samples with missing/non-finite coordinates or an
/// explicit invalid flag, then sorts survivors by timestamp. The input
/// contract does not require pre-sorted samples, so ordering is established
/// here and preserved by every later stage.
pub struct ValidateStage {
    logger: LogManager,
}

impl ValidateStage {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
        }
    }
}

impl Default for ValidateStage {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for ValidateStage {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn apply(&self, samples: Vec<GazeSample>) -> Vec<GazeSample> {
        let total = samples.len();
        let mut kept: Vec<GazeSample> = samples
            .into_iter()
            .filter(|s| s.x.is_finite() && s.y.is_finite() && s.validity == Validity::Valid)
            .collect();
        kept.sort_by_key(|s| s.timestamp);

        self.logger.record(&format!(
            "ValidateStage kept {} of {} samples",
            kept.len(),
            total
        ));
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_non_finite_and_invalid_samples() {
        let mut bad = GazeSample::new(10, f32::NAN, 5.0);
        bad.validity = Validity::Valid;
        let mut flagged = GazeSample::new(20, 1.0, 1.0);
        flagged.validity = Validity::Invalid;
        let samples = vec![GazeSample::new(0, 1.0, 2.0), bad, flagged];

        let out = ValidateStage::new().apply(samples);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp, 0);
    }

    #[test]
    fn sorts_unordered_input_by_timestamp() {
        let samples = vec![
            GazeSample::new(66, 3.0, 3.0),
            GazeSample::new(0, 1.0, 1.0),
            GazeSample::new(33, 2.0, 2.0),
        ];
        let out = ValidateStage::new().apply(samples);
        let stamps: Vec<i64> = out.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![0, 33, 66]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(ValidateStage::new().apply(Vec::new()).is_empty());
    }
}
