//! Public API surface for the backend.
//!
//! This file consolidates the DTO types returned by the service layer and the
//! HTTP API. All types derive Serialize for JSON output.

pub use crate::routes::analysis::InflectionAnalysis;
pub use crate::routes::analysis::SeriesAnalysis;
pub use crate::routes::annual::AnnualData;
pub use crate::routes::landing::CompanyInfo;
pub use crate::routes::landing::IngestSummary;

pub use crate::algorithms::{
    AnnualBreakdown, AnnualRow, AnnualStatistics, BreakdownRow, ClusterMark, DetectionStrategy,
    MidpointMark, PatternCategory, PatternDiagnosis, PatternIssue, Recommendation,
    SeriesStatistics, StrategyKind, TransitionDirection, TransitionMarker,
};
pub use crate::models::{AnalysisMode, CallRecord, ExtremaSet, Extremum, ExtremumKind};

use serde::{Deserialize, Serialize};

/// Company identifier as stored in the call warehouse.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CompanyId(pub i64);

impl CompanyId {
    pub fn new(value: i64) -> Self {
        CompanyId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CompanyId> for i64 {
    fn from(id: CompanyId) -> Self {
        id.0
    }
}

impl From<i64> for CompanyId {
    fn from(value: i64) -> Self {
        CompanyId(value)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
