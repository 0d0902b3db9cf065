//! Inflection-point analysis.
//!
//! Everything in here is pure and synchronous: a twelve-month series goes in,
//! detected extrema, a pattern diagnosis, transition markers and annual
//! aggregates come out.

pub mod annual;
pub mod classifier;
pub mod detector;
pub mod midpoints;
pub mod stats;
pub mod transitions;

pub use annual::{
    aggregate_annual, yearly_totals, AnnualBreakdown, AnnualRow, AnnualStatistics, BreakdownRow,
};
pub use classifier::{
    alternates, classify, PatternCategory, PatternDiagnosis, PatternIssue, Recommendation,
    CLUSTER_DISTANCE, EXPECTED_POINTS,
};
pub use detector::{
    detect, quartiles, validate_series, DetectionStrategy, HybridParams, SensitiveParams,
    StrategyKind, StrictParams,
};
pub use midpoints::{cluster_marks, optimize_midpoint_marks, ClusterMark, MidpointMark};
pub use stats::SeriesStatistics;
pub use transitions::{
    compute_transitions, label_extrema, ExtremumLabel, TransitionDirection, TransitionMarker,
};
