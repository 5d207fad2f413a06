pub mod segmenter;

pub use segmenter::{EventSegmenter, SegmentedEvents};
