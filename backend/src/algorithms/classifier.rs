//! Pattern classification of detected extrema.
//!
//! Rules are evaluated in priority order and the first match wins:
//!
//! 1. fewer than four extrema: [`PatternCategory::InsufficientPoints`]
//! 2. more than four: [`PatternCategory::TooManyPoints`]
//! 3. two extrema within [`CLUSTER_DISTANCE`] months: [`PatternCategory::ClusteredPoints`]
//! 4. same kind twice in a row around the year: [`PatternCategory::NonAlternating`]
//! 5. otherwise [`PatternCategory::Normal`]
//!
//! The diagnosis carries structured issues and recommendations. Their
//! `default_message` is the English source text; translation belongs to the
//! presentation layer.

use serde::{Deserialize, Serialize};

use crate::models::{circular_distance, ExtremaSet, Extremum, ExtremumKind, MONTHS_PER_YEAR};

/// Extrema at most this many months apart are clustered.
pub const CLUSTER_DISTANCE: usize = 2;

/// Extrema count of a well-formed seasonal pattern (two peaks, two valleys).
pub const EXPECTED_POINTS: usize = 4;

/// Structural category of a detected pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    InsufficientPoints,
    TooManyPoints,
    ClusteredPoints,
    NonAlternating,
    Normal,
}

impl PatternCategory {
    pub fn key(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientPoints => "insufficient_points",
            PatternCategory::TooManyPoints => "too_many_points",
            PatternCategory::ClusteredPoints => "clustered_points",
            PatternCategory::NonAlternating => "non_alternating",
            PatternCategory::Normal => "normal",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientPoints => "Insufficient Points",
            PatternCategory::TooManyPoints => "Too Many Points",
            PatternCategory::ClusteredPoints => "Clustered Points",
            PatternCategory::NonAlternating => "Non-Alternating",
            PatternCategory::Normal => "Normal",
        }
    }

    /// Fixed recommendation attached to the category.
    pub fn recommendation(&self) -> Recommendation {
        match self {
            PatternCategory::InsufficientPoints => Recommendation::IncreaseSensitivity,
            PatternCategory::TooManyPoints => Recommendation::ReduceSensitivity,
            PatternCategory::ClusteredPoints => Recommendation::UseStrictStrategy,
            PatternCategory::NonAlternating => Recommendation::UseHybridStrategy,
            PatternCategory::Normal => Recommendation::NoActionNeeded,
        }
    }
}

/// Guidance attached to a diagnosis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    IncreaseSensitivity,
    ReduceSensitivity,
    UseStrictStrategy,
    UseHybridStrategy,
    NoActionNeeded,
}

impl Recommendation {
    pub fn default_message(&self) -> &'static str {
        match self {
            Recommendation::IncreaseSensitivity => "Increase sensitivity or check data quality",
            Recommendation::ReduceSensitivity => {
                "Reduce sensitivity or use the strict detection strategy"
            }
            Recommendation::UseStrictStrategy => {
                "Consider using the strict detection strategy for better separation"
            }
            Recommendation::UseHybridStrategy => {
                "Try the hybrid detection strategy for better seasonal patterns"
            }
            Recommendation::NoActionNeeded => {
                "Optimal pattern: well-separated alternating peaks and valleys"
            }
        }
    }
}

/// A specific problem found in the extrema layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternIssue {
    /// Two extrema of the same kind follow each other around the year.
    ConsecutiveSameKind {
        kind: ExtremumKind,
        first_month: usize,
        second_month: usize,
    },
    /// Two extrema lie within the cluster distance.
    TooClose {
        first_month: usize,
        first_kind: ExtremumKind,
        second_month: usize,
        second_kind: ExtremumKind,
        distance: usize,
    },
    /// Both December and January hold an extremum.
    YearEndTransition {
        december_kind: ExtremumKind,
        january_kind: ExtremumKind,
    },
}

/// Classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDiagnosis {
    pub category: PatternCategory,
    /// True only for [`PatternCategory::Normal`].
    pub is_well_formed: bool,
    pub is_alternating: bool,
    pub total_points: usize,
    pub issues: Vec<PatternIssue>,
    pub recommendations: Vec<Recommendation>,
}

/// Whether extrema ordered by month alternate kind around the circular year.
///
/// An empty list alternates trivially; a single extremum does not, since it
/// neighbours itself.
pub fn alternates(chronological: &[Extremum]) -> bool {
    first_repeat(chronological).is_none()
}

/// First pair of circularly adjacent extrema sharing a kind.
pub(crate) fn first_repeat(chronological: &[Extremum]) -> Option<(Extremum, Extremum)> {
    let n = chronological.len();
    (0..n)
        .map(|i| (chronological[i], chronological[(i + 1) % n]))
        .find(|(a, b)| a.kind == b.kind)
}

/// Distinct adjacent pairs of the circular walk.
///
/// With two points the forward and wraparound pair coincide and are reported once.
fn adjacent_pairs(n: usize) -> Vec<(usize, usize)> {
    match n {
        0 | 1 => Vec::new(),
        2 => vec![(0, 1)],
        _ => (0..n).map(|i| (i, (i + 1) % n)).collect(),
    }
}

/// Classify a detected extrema set. Never fails.
///
/// # Examples
///
/// ```
/// use calls_inflection::algorithms::{classify, PatternCategory};
/// use calls_inflection::models::ExtremaSet;
///
/// let values = [1.0; 12];
/// let extrema = ExtremaSet::from_indices(&values, &[3, 9], &[0, 6]);
/// let diagnosis = classify(&extrema);
/// assert_eq!(diagnosis.category, PatternCategory::Normal);
/// assert!(diagnosis.is_well_formed);
/// ```
pub fn classify(extrema: &ExtremaSet) -> PatternDiagnosis {
    let points = extrema.chronological();
    let total_points = points.len();
    let is_alternating = alternates(&points);

    let mut issues = Vec::new();

    for (i, j) in adjacent_pairs(total_points) {
        let (a, b) = (points[i], points[j]);
        if a.kind == b.kind {
            issues.push(PatternIssue::ConsecutiveSameKind {
                kind: a.kind,
                first_month: a.month,
                second_month: b.month,
            });
        }
    }

    let mut clustered = false;
    for i in 0..total_points {
        for j in (i + 1)..total_points {
            let (a, b) = (points[i], points[j]);
            let distance = circular_distance(a.month, b.month);
            if distance <= CLUSTER_DISTANCE {
                clustered = true;
                issues.push(PatternIssue::TooClose {
                    first_month: a.month,
                    first_kind: a.kind,
                    second_month: b.month,
                    second_kind: b.kind,
                    distance,
                });
            }
        }
    }

    let december = points.iter().find(|p| p.month == MONTHS_PER_YEAR - 1);
    let january = points.iter().find(|p| p.month == 0);
    if let (Some(dec), Some(jan)) = (december, january) {
        issues.push(PatternIssue::YearEndTransition {
            december_kind: dec.kind,
            january_kind: jan.kind,
        });
    }

    let category = if total_points < EXPECTED_POINTS {
        PatternCategory::InsufficientPoints
    } else if total_points > EXPECTED_POINTS {
        PatternCategory::TooManyPoints
    } else if clustered {
        PatternCategory::ClusteredPoints
    } else if !is_alternating {
        PatternCategory::NonAlternating
    } else {
        PatternCategory::Normal
    };

    let mut recommendations = vec![category.recommendation()];
    if clustered {
        push_unique(&mut recommendations, Recommendation::UseStrictStrategy);
    }
    if !is_alternating {
        push_unique(&mut recommendations, Recommendation::UseHybridStrategy);
    }

    PatternDiagnosis {
        category,
        is_well_formed: category == PatternCategory::Normal,
        is_alternating,
        total_points,
        issues,
        recommendations,
    }
}

fn push_unique(recommendations: &mut Vec<Recommendation>, rec: Recommendation) {
    if !recommendations.contains(&rec) {
        recommendations.push(rec);
    }
}
