pub mod gaps;
pub mod outliers;
pub mod smooth;
pub mod validate;

pub use gaps::GapFillStage;
pub use outliers::OutlierStage;
pub use smooth::SmoothStage;
pub use validate::ValidateStage;
