pub mod aoi;
pub mod pupil;
pub mod scanpath;

pub use aoi::AoiAnalyzer;
pub use pupil::PupilAnalyzer;
pub use scanpath::ScanpathSummarizer;
