//! Annual aggregation for one company.

use super::error::ServiceResult;
use crate::algorithms::{aggregate_annual, yearly_totals, AnnualBreakdown};
use crate::api::{AnnualData, CompanyId};
use crate::db::{services, FullRepository};
use crate::models::{AnalysisMode, CallRecord};

pub fn compute_annual_data(
    company_id: CompanyId,
    records: &[CallRecord],
    mode: AnalysisMode,
) -> AnnualData {
    let totals = yearly_totals(records);
    let historical: u64 = totals.values().sum();
    let breakdown = AnnualBreakdown::from_records(records, mode);
    let statistics = breakdown.statistics();

    AnnualData {
        company_id,
        mode,
        rows: aggregate_annual(&totals, Some(historical)),
        breakdown,
        statistics,
    }
}

pub async fn get_annual_data<R: FullRepository + ?Sized>(
    repo: &R,
    company_id: CompanyId,
    mode: AnalysisMode,
) -> ServiceResult<AnnualData> {
    let records = services::fetch_company_records(repo, company_id).await?;
    Ok(compute_annual_data(company_id, &records, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;

    fn record(year: i32, month: u32, calls: u64) -> CallRecord {
        CallRecord {
            company_id: CompanyId::new(12),
            company_name: "Stark".to_string(),
            state: "NV".to_string(),
            year,
            month,
            calls,
            campaigns: 1,
            customers: 1,
        }
    }

    #[test]
    fn test_annual_data_with_gap_year() {
        let records = vec![record(2019, 1, 30), record(2019, 7, 10), record(2021, 3, 60)];
        let data = compute_annual_data(CompanyId::new(12), &records, AnalysisMode::Absolute);

        let years: Vec<Option<i32>> = data.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Some(2019), Some(2020), Some(2021), None]);
        assert_eq!(data.rows[3].total_calls, 100);
        assert!(data.rows[0].is_min);
        assert!(data.rows[2].is_max);

        // breakdown only has rows for years with data
        assert_eq!(data.breakdown.rows.len(), 3);
        assert_eq!(data.statistics.years_analyzed, 2);
    }

    #[tokio::test]
    async fn test_get_annual_data_percentage_mode() {
        let repo = LocalRepository::with_records(vec![record(2020, 1, 25), record(2020, 2, 75)]);
        let data = get_annual_data(&repo, CompanyId::new(12), AnalysisMode::Percentage)
            .await
            .unwrap();
        assert_eq!(data.mode, AnalysisMode::Percentage);
        assert_eq!(data.breakdown.rows[0].values[1], 75.0);
        assert!(get_annual_data(&repo, CompanyId::new(13), AnalysisMode::Percentage)
            .await
            .is_err());
    }
}
