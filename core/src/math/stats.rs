pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f32]) -> f32 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f32>() / values.len() as f32
    }

    /// Population standard deviation (divides by N, not N-1).
    pub fn population_std_dev(values: &[f32]) -> f32 {
        if values.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(values);
        let variance =
            values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / values.len() as f32;
        variance.sqrt()
    }

    /// Median of integer intervals; averages the middle pair for even counts.
    pub fn median(values: &[i64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid] as f64
        } else {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        }
    }

    pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        let dx = x2 - x1;
        let dy = y2 - y1;
        (dx * dx + dy * dy).sqrt()
    }
}
