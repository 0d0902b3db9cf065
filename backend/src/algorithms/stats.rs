use serde::{Deserialize, Serialize};

use crate::models::ExtremaSet;

/// Headline figures shown next to the detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub peak_count: usize,
    pub valley_count: usize,
    pub monthly_mean: f64,
    /// Highest minus lowest monthly value.
    pub max_variation: f64,
}

impl SeriesStatistics {
    pub fn compute(values: &[f64], extrema: &ExtremaSet) -> Self {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let monthly_mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Self {
            peak_count: extrema.peaks.len(),
            valley_count: extrema.valleys.len(),
            monthly_mean,
            max_variation: if values.is_empty() { 0.0 } else { max - min },
        }
    }
}
