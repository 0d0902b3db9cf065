//! Inflection analysis orchestration.
//!
//! [`analyze_series`] runs the detection pipeline on a single series;
//! [`compute_inflection_analysis`] builds the full company view on top of it.

use log::{debug, warn};

use super::companies::compute_company_info;
use super::error::ServiceResult;
use crate::algorithms::{
    aggregate_annual, classify, compute_transitions, detect, optimize_midpoint_marks,
    yearly_totals, AnnualBreakdown, DetectionStrategy, SeriesStatistics,
};
use crate::api::{CompanyId, InflectionAnalysis, SeriesAnalysis};
use crate::db::{services, FullRepository, RepositoryError};
use crate::error::AnalysisResult;
use crate::models::{AnalysisMode, CallRecord, MonthlySeries};

/// Detect, classify and mark one twelve-month series.
///
/// Transition markers are left empty when the detected extrema do not
/// alternate; the diagnosis already reports why.
///
/// # Errors
///
/// Fails on a malformed series or out-of-range strategy parameters.
///
/// # Examples
///
/// ```
/// use calls_inflection::algorithms::{DetectionStrategy, PatternCategory};
/// use calls_inflection::models::AnalysisMode;
/// use calls_inflection::services::analyze_series;
///
/// let series = [5.0, 7.5, 12.5, 15.0, 12.5, 7.5, 5.0, 7.5, 12.5, 15.0, 12.5, 7.5];
/// let analysis = analyze_series(&series, AnalysisMode::Percentage, DetectionStrategy::default()).unwrap();
/// assert_eq!(analysis.diagnosis.category, PatternCategory::Normal);
/// assert_eq!(analysis.transitions.len(), 4);
/// ```
pub fn analyze_series(
    values: &[f64],
    mode: AnalysisMode,
    strategy: DetectionStrategy,
) -> AnalysisResult<SeriesAnalysis> {
    let extrema = detect(values, &strategy)?;
    let diagnosis = classify(&extrema);
    debug!(
        "{} detection: {} peaks, {} valleys, pattern {}",
        strategy.kind(),
        extrema.peaks.len(),
        extrema.valleys.len(),
        diagnosis.category.key()
    );

    let transitions = match compute_transitions(&extrema) {
        Ok(markers) => markers,
        Err(err) => {
            warn!("transition markers unavailable: {}", err);
            Vec::new()
        }
    };
    let midpoint_marks = optimize_midpoint_marks(&diagnosis, values, &extrema)?;
    let statistics = SeriesStatistics::compute(values, &extrema);

    Ok(SeriesAnalysis {
        mode,
        strategy,
        values: values.to_vec(),
        extrema,
        diagnosis,
        transitions,
        midpoint_marks,
        statistics,
    })
}

/// Full analysis for one company's rows.
///
/// # Errors
/// `NotFound` for an empty slice.
pub fn compute_inflection_analysis(
    records: &[CallRecord],
    mode: AnalysisMode,
    strategy: DetectionStrategy,
) -> ServiceResult<InflectionAnalysis> {
    let company = compute_company_info(records)
        .ok_or_else(|| RepositoryError::not_found("no call records to analyze"))?;

    let monthly = MonthlySeries::from_records(records);
    let series = analyze_series(&monthly.values(mode), mode, strategy)?;

    let annual_rows = aggregate_annual(&yearly_totals(records), Some(monthly.total()));
    let breakdown = AnnualBreakdown::from_records(records, mode);
    let annual_statistics = breakdown.statistics();

    Ok(InflectionAnalysis {
        company,
        counts: monthly.counts().to_vec(),
        percentages: monthly.percentages().to_vec(),
        series,
        annual_rows,
        breakdown,
        annual_statistics,
    })
}

/// Fetch a company's rows and analyze them.
pub async fn get_inflection_analysis<R: FullRepository + ?Sized>(
    repo: &R,
    company_id: CompanyId,
    mode: AnalysisMode,
    strategy: DetectionStrategy,
) -> ServiceResult<InflectionAnalysis> {
    let records = services::fetch_company_records(repo, company_id).await?;
    compute_inflection_analysis(&records, mode, strategy)
}

#[cfg(test)]
#[path = "inflection_tests.rs"]
mod inflection_tests;
