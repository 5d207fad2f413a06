pub mod events;
pub mod metrics;
pub mod sample;

pub use events::{Blink, Fixation, Saccade};
pub use metrics::{
    AnalysisResult, AoiMetrics, AoiRegion, DilationEvent, PupilMetrics, ScanpathMetrics,
};
pub use sample::{GazeSample, SessionInfo, SessionPayload, Validity};
