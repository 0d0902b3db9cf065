//! Company catalogue built from stored call rows.

use log::debug;
use std::collections::BTreeSet;

use super::error::ServiceResult;
use crate::api::{CompanyId, CompanyInfo};
use crate::db::{services, FullRepository};
use crate::models::CallRecord;

/// Summarise one company's rows.
///
/// The name is taken from the most recent row. Returns `None` for an empty
/// slice.
pub fn compute_company_info(records: &[CallRecord]) -> Option<CompanyInfo> {
    let latest = records.iter().max_by_key(|r| (r.year, r.month))?;
    let regions: BTreeSet<&str> = records
        .iter()
        .map(|r| r.state.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    Some(CompanyInfo {
        company_id: latest.company_id,
        company_name: latest.company_name.clone(),
        total_calls: records.iter().map(|r| r.calls).sum(),
        first_year: records.iter().map(|r| r.year).min()?,
        last_year: latest.year,
        regions: regions.into_iter().map(str::to_string).collect(),
        total_campaigns: records.iter().map(|r| r.campaigns).sum(),
        total_customers: records.iter().map(|r| r.customers).sum(),
        record_count: records.len(),
    })
}

/// All companies, sorted by id.
pub async fn list_companies<R: FullRepository + ?Sized>(repo: &R) -> ServiceResult<Vec<CompanyInfo>> {
    let mut companies = Vec::new();
    for company_id in services::list_company_ids(repo).await? {
        let records = services::fetch_company_records(repo, company_id).await?;
        if let Some(info) = compute_company_info(&records) {
            companies.push(info);
        }
    }
    companies.sort_by_key(|c| c.company_id);
    debug!("listed {} companies", companies.len());
    Ok(companies)
}

/// One company's summary.
///
/// # Errors
/// `NotFound` when the company has no rows.
pub async fn get_company<R: FullRepository + ?Sized>(
    repo: &R,
    company_id: CompanyId,
) -> ServiceResult<CompanyInfo> {
    let records = services::fetch_company_records(repo, company_id).await?;
    compute_company_info(&records).ok_or_else(|| {
        crate::db::RepositoryError::not_found(format!("company {}", company_id)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;

    fn record(company: i64, name: &str, state: &str, year: i32, month: u32, calls: u64) -> CallRecord {
        CallRecord {
            company_id: CompanyId::new(company),
            company_name: name.to_string(),
            state: state.to_string(),
            year,
            month,
            calls,
            campaigns: 1,
            customers: 2,
        }
    }

    #[test]
    fn test_company_info_summary() {
        let records = vec![
            record(1, "Old Name", "TX", 2018, 4, 10),
            record(1, "New Name", "CA", 2021, 2, 5),
            record(1, "Old Name", "TX", 2019, 12, 7),
        ];
        let info = compute_company_info(&records).unwrap();
        assert_eq!(info.company_name, "New Name");
        assert_eq!(info.total_calls, 22);
        assert_eq!((info.first_year, info.last_year), (2018, 2021));
        assert_eq!(info.regions, vec!["CA", "TX"]);
        assert_eq!(info.total_campaigns, 3);
        assert_eq!(info.total_customers, 6);
        assert_eq!(info.record_count, 3);
    }

    #[test]
    fn test_empty_records_have_no_info() {
        assert!(compute_company_info(&[]).is_none());
    }

    #[tokio::test]
    async fn test_list_companies_sorted() {
        let repo = LocalRepository::with_records(vec![
            record(30, "C", "NY", 2020, 1, 1),
            record(10, "A", "NY", 2020, 1, 1),
            record(20, "B", "NY", 2020, 1, 1),
        ]);
        let ids: Vec<i64> = list_companies(&repo)
            .await
            .unwrap()
            .iter()
            .map(|c| c.company_id.value())
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_get_unknown_company() {
        let repo = LocalRepository::new();
        let err = get_company(&repo, CompanyId::new(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
