use serde::Serialize;

use crate::algorithms::{
    AnnualBreakdown, AnnualRow, AnnualStatistics, DetectionStrategy, MidpointMark,
    PatternDiagnosis, SeriesStatistics, TransitionMarker,
};
use crate::models::{AnalysisMode, ExtremaSet};

use super::landing::CompanyInfo;

// =========================================================
// Inflection analysis types
// =========================================================

/// Pipeline output for one twelve-month series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesAnalysis {
    pub mode: AnalysisMode,
    pub strategy: DetectionStrategy,
    /// The series fed to the detector.
    pub values: Vec<f64>,
    pub extrema: ExtremaSet,
    pub diagnosis: PatternDiagnosis,
    /// Empty when the extrema do not alternate.
    pub transitions: Vec<TransitionMarker>,
    pub midpoint_marks: Vec<MidpointMark>,
    pub statistics: SeriesStatistics,
}

/// Complete analysis for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflectionAnalysis {
    pub company: CompanyInfo,
    pub counts: Vec<u64>,
    pub percentages: Vec<f64>,
    pub series: SeriesAnalysis,
    pub annual_rows: Vec<AnnualRow>,
    pub breakdown: AnnualBreakdown,
    pub annual_statistics: AnnualStatistics,
}

/// Route function name constants for analysis
pub const GET_INFLECTION_ANALYSIS: &str = "get_inflection_analysis";
pub const ANALYZE_SERIES: &str = "analyze_series";
