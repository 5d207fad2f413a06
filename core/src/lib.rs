//! Core cleaning and event-extraction pipeline for the gaze analytics
//! platform.
//!
//! Raw gaze samples flow through validation, gap interpolation, outlier
//! rejection and smoothing, are annotated with angular velocity and
//! acceleration, and are segmented into fixation/saccade/blink events with
//! per-region dwell, pupil and scanpath metrics derived on top. Every stage
//! is a pure transformation over an ordered sequence; rendering, persistence
//! and capture live outside this crate.

pub mod analysis;
pub mod cleaning;
pub mod events;
pub mod kinematics;
pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod session;
pub mod telemetry;

pub use pipeline::Pipeline;
pub use prelude::{CleaningStage, ConfigError, PipelineConfig};
pub use session::{AnalysisResult, GazeSample, SessionPayload};
