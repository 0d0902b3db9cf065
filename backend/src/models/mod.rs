//! Domain values shared by the analysis pipeline.

pub mod calls;
pub mod circular;
pub mod extrema;
pub mod series;

pub use calls::{CallRecord, DataWindow};
pub use circular::{
    arc_mean, circular_distance, circular_midpoint, forward_gap, next_month, prev_month,
    MONTHS_PER_YEAR,
};
pub use extrema::{ExtremaSet, Extremum, ExtremumKind};
pub use series::{AnalysisMode, MonthlySeries};
