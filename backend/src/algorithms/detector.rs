//! Peak and valley detection over a 12-month series.
//!
//! Three fixed strategies are available through [`DetectionStrategy`]:
//!
//! - **sensitive**: circular local maxima/minima, at least 2 months between
//!   extrema of the same kind, peaks above the mean and valleys below it.
//! - **strict**: the two highest values of the upper quartile region and the
//!   two lowest of the lower quartile region. Always 2 + 2.
//! - **hybrid**: the sensitive algorithm with a 3–4 month separation. This is
//!   the default.
//!
//! All strategies are pure functions of the series and their parameters.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{circular_distance, prev_month, ExtremaSet, ExtremumKind, MONTHS_PER_YEAR};

/// Default minimum distance between same-kind extrema for the sensitive strategy.
pub const SENSITIVE_MIN_SEPARATION: usize = 2;

/// Default minimum distance between same-kind extrema for the hybrid strategy.
pub const HYBRID_MIN_SEPARATION: usize = 3;

/// Separations accepted by the hybrid strategy.
pub const HYBRID_SEPARATION_RANGE: RangeInclusive<usize> = 3..=4;

/// Peaks (and valleys) returned by the strict strategy.
pub const STRICT_POINTS_PER_KIND: usize = 2;

/// Series with fewer distinct values than this are treated as flat.
const MIN_DISTINCT_VALUES: usize = 3;

/// Parameters of the sensitive strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveParams {
    pub min_separation: usize,
}

impl Default for SensitiveParams {
    fn default() -> Self {
        Self {
            min_separation: SENSITIVE_MIN_SEPARATION,
        }
    }
}

/// Parameters of the strict strategy. It has no tunables; the struct keeps
/// the strategy variants uniform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrictParams {}

/// Parameters of the hybrid strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridParams {
    /// Minimum distance in months, 3 or 4.
    pub min_separation: usize,
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            min_separation: HYBRID_MIN_SEPARATION,
        }
    }
}

/// Name of a detection strategy, without parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Sensitive,
    Strict,
    #[default]
    Hybrid,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sensitive => "sensitive",
            StrategyKind::Strict => "strict",
            StrategyKind::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sensitive" | "original" => Ok(Self::Sensitive),
            "strict" | "quartiles" => Ok(Self::Strict),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("Unknown detection strategy: {}", s)),
        }
    }
}

/// A detection strategy together with its parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum DetectionStrategy {
    Sensitive(SensitiveParams),
    Strict(StrictParams),
    Hybrid(HybridParams),
}

impl Default for DetectionStrategy {
    fn default() -> Self {
        DetectionStrategy::Hybrid(HybridParams::default())
    }
}

impl DetectionStrategy {
    /// Build a strategy from its name, overriding the separation when given.
    ///
    /// The separation is ignored for the strict strategy.
    pub fn from_kind(kind: StrategyKind, min_separation: Option<usize>) -> Self {
        match kind {
            StrategyKind::Sensitive => DetectionStrategy::Sensitive(SensitiveParams {
                min_separation: min_separation.unwrap_or(SENSITIVE_MIN_SEPARATION),
            }),
            StrategyKind::Strict => DetectionStrategy::Strict(StrictParams::default()),
            StrategyKind::Hybrid => DetectionStrategy::Hybrid(HybridParams {
                min_separation: min_separation.unwrap_or(HYBRID_MIN_SEPARATION),
            }),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            DetectionStrategy::Sensitive(_) => StrategyKind::Sensitive,
            DetectionStrategy::Strict(_) => StrategyKind::Strict,
            DetectionStrategy::Hybrid(_) => StrategyKind::Hybrid,
        }
    }

    /// Check the strategy parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        match self {
            DetectionStrategy::Sensitive(p) if p.min_separation == 0 => {
                Err(AnalysisError::InvalidParameter {
                    parameter: "min_separation",
                    reason: "sensitive separation must be at least 1 month".to_string(),
                })
            }
            DetectionStrategy::Hybrid(p) if !HYBRID_SEPARATION_RANGE.contains(&p.min_separation) => {
                Err(AnalysisError::InvalidParameter {
                    parameter: "min_separation",
                    reason: format!(
                        "hybrid separation was {}, expected {}-{} months",
                        p.min_separation,
                        HYBRID_SEPARATION_RANGE.start(),
                        HYBRID_SEPARATION_RANGE.end()
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Detect peaks and valleys in `values` with the given strategy.
///
/// # Errors
///
/// Fails when `values` is not exactly 12 long, contains a negative or
/// non-finite value, or the strategy parameters are out of range. A flat
/// series is not an error: the local strategies return an empty set.
///
/// # Examples
///
/// ```
/// use calls_inflection::algorithms::{detect, DetectionStrategy};
///
/// let series = [5.0, 7.5, 12.5, 15.0, 12.5, 7.5, 5.0, 7.5, 12.5, 15.0, 12.5, 7.5];
/// let extrema = detect(&series, &DetectionStrategy::default()).unwrap();
/// assert_eq!(extrema.peak_months(), vec![3, 9]);
/// assert_eq!(extrema.valley_months(), vec![0, 6]);
/// ```
pub fn detect(values: &[f64], strategy: &DetectionStrategy) -> AnalysisResult<ExtremaSet> {
    strategy.validate()?;
    let series = validate_series(values)?;

    let extrema = match strategy {
        DetectionStrategy::Sensitive(params) => detect_local(&series, params.min_separation),
        DetectionStrategy::Hybrid(params) => detect_local(&series, params.min_separation),
        DetectionStrategy::Strict(_) => detect_quartiles(&series),
    };

    debug!(
        "{} detection found peaks {:?} and valleys {:?}",
        strategy.kind(),
        extrema.peak_months(),
        extrema.valley_months()
    );

    Ok(extrema)
}

/// Check that `values` is a well-formed monthly series and copy it into a
/// fixed-size array.
pub fn validate_series(values: &[f64]) -> AnalysisResult<[f64; MONTHS_PER_YEAR]> {
    if values.len() != MONTHS_PER_YEAR {
        return Err(AnalysisError::InvalidLength {
            actual: values.len(),
            expected: MONTHS_PER_YEAR,
        });
    }

    let mut series = [0.0; MONTHS_PER_YEAR];
    for (month, (&value, slot)) in values.iter().zip(series.iter_mut()).enumerate() {
        if !value.is_finite() {
            return Err(AnalysisError::NonFiniteValue { month, value });
        }
        if value < 0.0 {
            return Err(AnalysisError::NegativeValue { month, value });
        }
        *slot = value;
    }
    Ok(series)
}

/// First and third quartile, linearly interpolated between closest ranks.
pub fn quartiles(values: &[f64]) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    (percentile(&sorted, 0.25), percentile(&sorted, 0.75))
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

fn distinct_values(series: &[f64]) -> usize {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}

fn detect_local(series: &[f64; MONTHS_PER_YEAR], min_separation: usize) -> ExtremaSet {
    if distinct_values(series) < MIN_DISTINCT_VALUES {
        return ExtremaSet::default();
    }

    let mean = mean(series);

    let peaks: Vec<usize> = turning_points(series, ExtremumKind::Peak)
        .into_iter()
        .filter(|&m| series[m] > mean)
        .collect();
    let valleys: Vec<usize> = turning_points(series, ExtremumKind::Valley)
        .into_iter()
        .filter(|&m| series[m] < mean)
        .collect();

    let peaks = enforce_separation(peaks, series, mean, min_separation);
    let valleys = enforce_separation(valleys, series, mean, min_separation);

    ExtremaSet::from_indices(series, &peaks, &valleys)
}

/// Circular local maxima (or minima) against the immediate neighbours.
///
/// A plateau of equal values counts once, at its middle month (rounded
/// down), when both months bordering it are lower (or higher).
fn turning_points(series: &[f64; MONTHS_PER_YEAR], kind: ExtremumKind) -> Vec<usize> {
    // Start scanning at the first month that opens a plateau so no run
    // straddles the scan origin. A fully flat series has no such month.
    let Some(origin) = (0..MONTHS_PER_YEAR).find(|&m| series[m] != series[prev_month(m)]) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut offset = 0;
    while offset < MONTHS_PER_YEAR {
        let run_start = (origin + offset) % MONTHS_PER_YEAR;
        let value = series[run_start];

        let mut run_len = 1;
        while run_len < MONTHS_PER_YEAR
            && series[(run_start + run_len) % MONTHS_PER_YEAR] == value
        {
            run_len += 1;
        }

        let left = series[prev_month(run_start)];
        let right = series[(run_start + run_len) % MONTHS_PER_YEAR];
        let is_turning = match kind {
            ExtremumKind::Peak => value > left && value > right,
            ExtremumKind::Valley => value < left && value < right,
        };
        if is_turning {
            points.push((run_start + (run_len - 1) / 2) % MONTHS_PER_YEAR);
        }

        offset += run_len;
    }

    points.sort_unstable();
    points
}

/// Drop candidates closer than `min_separation` months to a stronger one.
///
/// Candidates are accepted in order of decreasing distance from the mean,
/// earlier months first on ties.
fn enforce_separation(
    candidates: Vec<usize>,
    series: &[f64; MONTHS_PER_YEAR],
    mean: f64,
    min_separation: usize,
) -> Vec<usize> {
    let mut ranked = candidates;
    ranked.sort_by(|&a, &b| {
        let dev_a = (series[a] - mean).abs();
        let dev_b = (series[b] - mean).abs();
        dev_b
            .partial_cmp(&dev_a)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut kept: Vec<usize> = Vec::with_capacity(ranked.len());
    for candidate in ranked {
        if kept
            .iter()
            .all(|&k| circular_distance(k, candidate) >= min_separation)
        {
            kept.push(candidate);
        }
    }

    kept.sort_unstable();
    kept
}

fn detect_quartiles(series: &[f64; MONTHS_PER_YEAR]) -> ExtremaSet {
    let (q1, q3) = quartiles(series);

    let mut ascending: Vec<usize> = (0..MONTHS_PER_YEAR).collect();
    ascending.sort_by(|&a, &b| series[a].total_cmp(&series[b]).then(a.cmp(&b)));
    let valleys = pick_ranked(&ascending, |m| series[m] <= q1, &[]);

    let mut descending: Vec<usize> = (0..MONTHS_PER_YEAR).collect();
    descending.sort_by(|&a, &b| series[b].total_cmp(&series[a]).then(a.cmp(&b)));
    let peaks = pick_ranked(&descending, |m| series[m] >= q3, &valleys);

    ExtremaSet::from_indices(series, &peaks, &valleys)
}

/// Take the first [`STRICT_POINTS_PER_KIND`] months of `ranked` that lie in
/// the quartile region and are not excluded, topping up in rank order when
/// the region is exhausted.
fn pick_ranked(ranked: &[usize], in_region: impl Fn(usize) -> bool, exclude: &[usize]) -> Vec<usize> {
    let mut picked: Vec<usize> = ranked
        .iter()
        .copied()
        .filter(|m| !exclude.contains(m) && in_region(*m))
        .take(STRICT_POINTS_PER_KIND)
        .collect();

    for &m in ranked {
        if picked.len() >= STRICT_POINTS_PER_KIND {
            break;
        }
        if !exclude.contains(&m) && !picked.contains(&m) {
            picked.push(m);
        }
    }

    picked
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod detector_tests;
