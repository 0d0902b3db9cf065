//! In-memory local repository implementation.
//!
//! All rows live in a `BTreeMap` keyed by company, guarded by a
//! `parking_lot::RwLock`. Used for tests, local development, and the default
//! server configuration with an optional JSON seed file.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::api::CompanyId;
use crate::db::repository::*;
use crate::models::CallRecord;

/// In-memory local repository.
///
/// # Example
/// ```
/// use calls_inflection::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.record_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    records: BTreeMap<CompanyId, Vec<CallRecord>>,
    batches: HashSet<String>,
    unhealthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `records` as one unnamed batch.
    pub fn with_records(records: Vec<CallRecord>) -> Self {
        let repo = Self::new();
        repo.insert_records(records);
        repo
    }

    fn insert_records(&self, records: Vec<CallRecord>) -> usize {
        let mut data = self.data.write();
        let count = records.len();
        for record in records {
            data.records.entry(record.company_id).or_default().push(record);
        }
        for rows in data.records.values_mut() {
            rows.sort_by_key(|r| (r.year, r.month));
        }
        count
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unhealthy = !healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.records.clear();
        data.batches.clear();
    }

    /// Number of rows stored.
    pub fn record_count(&self) -> usize {
        self.data.read().records.values().map(Vec::len).sum()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().unhealthy {
            return Err(RepositoryError::connection("local repository marked unhealthy")
                .with_context(ErrorContext::new(operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl CallsRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.data.read().unhealthy)
    }

    async fn store_call_batch(
        &self,
        checksum: &str,
        records: &[CallRecord],
    ) -> RepositoryResult<Option<usize>> {
        self.ensure_healthy("store_call_batch")?;
        if !self.data.write().batches.insert(checksum.to_string()) {
            return Ok(None);
        }
        Ok(Some(self.insert_records(records.to_vec())))
    }

    async fn has_batch(&self, checksum: &str) -> RepositoryResult<bool> {
        self.ensure_healthy("has_batch")?;
        Ok(self.data.read().batches.contains(checksum))
    }

    async fn fetch_company_records(
        &self,
        company_id: CompanyId,
    ) -> RepositoryResult<Vec<CallRecord>> {
        self.ensure_healthy("fetch_company_records")?;
        match self.data.read().records.get(&company_id) {
            Some(rows) if !rows.is_empty() => Ok(rows.clone()),
            _ => Err(
                RepositoryError::not_found(format!("no call records for company {}", company_id))
                    .with_context(
                        ErrorContext::new("fetch_company_records")
                            .with_entity("company")
                            .with_entity_id(company_id),
                    ),
            ),
        }
    }

    async fn count_records(&self) -> RepositoryResult<usize> {
        self.ensure_healthy("count_records")?;
        Ok(self.record_count())
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn list_company_ids(&self) -> RepositoryResult<Vec<CompanyId>> {
        self.ensure_healthy("list_company_ids")?;
        Ok(self.data.read().records.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(company: i64, year: i32, month: u32, calls: u64) -> CallRecord {
        CallRecord {
            company_id: CompanyId::new(company),
            company_name: format!("Company {}", company),
            state: "CA".to_string(),
            year,
            month,
            calls,
            campaigns: 1,
            customers: calls,
        }
    }

    #[tokio::test]
    async fn test_store_and_fetch_sorted() {
        let repo = LocalRepository::new();
        let stored = repo
            .store_call_batch(
                "abc",
                &[record(1, 2021, 2, 5), record(1, 2020, 7, 3), record(2, 2020, 1, 1)],
            )
            .await
            .unwrap();
        assert_eq!(stored, Some(3));

        let rows = repo.fetch_company_records(CompanyId::new(1)).await.unwrap();
        let periods: Vec<_> = rows.iter().map(|r| (r.year, r.month)).collect();
        assert_eq!(periods, vec![(2020, 7), (2021, 2)]);
    }

    #[tokio::test]
    async fn test_duplicate_batch_is_skipped() {
        let repo = LocalRepository::new();
        let rows = [record(1, 2020, 1, 10)];
        assert_eq!(repo.store_call_batch("same", &rows).await.unwrap(), Some(1));
        assert_eq!(repo.store_call_batch("same", &rows).await.unwrap(), None);
        assert!(repo.has_batch("same").await.unwrap());
        assert_eq!(repo.count_records().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_company_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .fetch_company_records(CompanyId::new(99))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_operations() {
        let repo = LocalRepository::with_records(vec![record(1, 2020, 1, 1)]);
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.list_company_ids().await.unwrap_err();
        assert!(err.is_retryable());

        repo.set_healthy(true);
        assert_eq!(repo.list_company_ids().await.unwrap(), vec![CompanyId::new(1)]);
    }

    #[tokio::test]
    async fn test_clear_removes_rows_and_batches() {
        let repo = LocalRepository::new();
        repo.store_call_batch("x", &[record(1, 2020, 1, 1)]).await.unwrap();
        repo.clear();
        assert_eq!(repo.record_count(), 0);
        assert!(!repo.has_batch("x").await.unwrap());
    }
}
