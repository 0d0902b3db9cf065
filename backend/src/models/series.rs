use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calls::CallRecord;
use super::circular::MONTHS_PER_YEAR;

/// Which representation of the monthly series feeds the detector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Share of the company's calls falling in each month.
    #[default]
    Percentage,
    /// Raw call counts per month.
    Absolute,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Percentage => "percentage",
            AnalysisMode::Absolute => "absolute",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" | "percentages" | "pct" => Ok(Self::Percentage),
            "absolute" | "count" | "counts" => Ok(Self::Absolute),
            _ => Err(format!("Unknown analysis mode: {}", s)),
        }
    }
}

/// Twelve months of call volume, as raw counts and as percentages of the
/// total.
///
/// Months without data are zero. When the total is zero every percentage is
/// zero as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    counts: [u64; MONTHS_PER_YEAR],
    percentages: [f64; MONTHS_PER_YEAR],
    total: u64,
}

impl MonthlySeries {
    pub fn from_counts(counts: [u64; MONTHS_PER_YEAR]) -> Self {
        let total: u64 = counts.iter().sum();
        let mut percentages = [0.0; MONTHS_PER_YEAR];
        if total > 0 {
            for (pct, &count) in percentages.iter_mut().zip(counts.iter()) {
                *pct = count as f64 / total as f64 * 100.0;
            }
        }
        Self {
            counts,
            percentages,
            total,
        }
    }

    /// Sum calls per calendar month across every year in `records`.
    ///
    /// Rows with a month outside 1–12 are skipped.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CallRecord>,
    {
        let mut counts = [0u64; MONTHS_PER_YEAR];
        for record in records {
            if let Some(idx) = record.month_index() {
                counts[idx] += record.calls;
            }
        }
        Self::from_counts(counts)
    }

    pub fn counts(&self) -> &[u64; MONTHS_PER_YEAR] {
        &self.counts
    }

    pub fn percentages(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.percentages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Values in the requested mode.
    pub fn values(&self, mode: AnalysisMode) -> [f64; MONTHS_PER_YEAR] {
        match mode {
            AnalysisMode::Percentage => self.percentages,
            AnalysisMode::Absolute => self.counts.map(|c| c as f64),
        }
    }
}
