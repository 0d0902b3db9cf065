//! Transition markers between consecutive extrema.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::first_repeat;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{circular_midpoint, ExtremaSet, Extremum, ExtremumKind};

/// Direction of the move between two extrema.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// Valley to peak.
    Rising,
    /// Peak to valley.
    Falling,
}

/// Chronological label of an extremum within its kind: `v1`, `p1`, `v2`, ...
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExtremumLabel {
    pub kind: ExtremumKind,
    /// 1-based position among extrema of the same kind.
    pub ordinal: usize,
}

impl fmt::Display for ExtremumLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.ordinal)
    }
}

impl Serialize for ExtremumLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Midpoint marker between one extremum and the next around the year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMarker {
    pub start_month: usize,
    pub end_month: usize,
    /// Fractional month position in `[0, 12)`.
    pub midpoint: f64,
    /// Mean of the two extremum values.
    pub midpoint_value: f64,
    pub direction: TransitionDirection,
    pub from: ExtremumLabel,
    pub to: ExtremumLabel,
    /// The walk from start to end passes December into January.
    pub crosses_year_end: bool,
}

/// Assign `v1`/`p1`-style labels to extrema already in chronological order.
pub fn label_extrema(chronological: &[Extremum]) -> Vec<ExtremumLabel> {
    let (mut peaks, mut valleys) = (0, 0);
    chronological
        .iter()
        .map(|e| {
            let counter = match e.kind {
                ExtremumKind::Peak => &mut peaks,
                ExtremumKind::Valley => &mut valleys,
            };
            *counter += 1;
            ExtremumLabel {
                kind: e.kind,
                ordinal: *counter,
            }
        })
        .collect()
}

/// One marker per extremum, pairing each with its chronological successor
/// and the last with the first.
///
/// The extrema must alternate kind around the year; otherwise
/// [`AnalysisError::NonAlternating`] names the first offending pair. An empty
/// set yields no markers.
///
/// # Examples
///
/// ```
/// use calls_inflection::algorithms::compute_transitions;
/// use calls_inflection::models::ExtremaSet;
///
/// let values = [5.0, 7.5, 12.5, 15.0, 12.5, 7.5, 5.0, 7.5, 12.5, 15.0, 12.5, 7.5];
/// let extrema = ExtremaSet::from_indices(&values, &[3, 9], &[0, 6]);
/// let markers = compute_transitions(&extrema).unwrap();
/// let midpoints: Vec<f64> = markers.iter().map(|m| m.midpoint).collect();
/// assert_eq!(midpoints, vec![1.5, 4.5, 7.5, 10.5]);
/// ```
pub fn compute_transitions(extrema: &ExtremaSet) -> AnalysisResult<Vec<TransitionMarker>> {
    let points = extrema.chronological();
    if points.is_empty() {
        return Ok(Vec::new());
    }
    if let Some((first, second)) = first_repeat(&points) {
        return Err(AnalysisError::NonAlternating {
            kind: first.kind,
            first: first.month,
            second: second.month,
        });
    }

    let labels = label_extrema(&points);
    let n = points.len();
    let markers = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            let (from, to) = (points[i], points[j]);
            TransitionMarker {
                start_month: from.month,
                end_month: to.month,
                midpoint: circular_midpoint(from.month, to.month),
                midpoint_value: (from.value + to.value) / 2.0,
                direction: match from.kind {
                    ExtremumKind::Valley => TransitionDirection::Rising,
                    ExtremumKind::Peak => TransitionDirection::Falling,
                },
                from: labels[i],
                to: labels[j],
                crosses_year_end: to.month < from.month,
            }
        })
        .collect();
    Ok(markers)
}
