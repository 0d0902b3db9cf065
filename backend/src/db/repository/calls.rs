use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::CompanyId;
use crate::models::CallRecord;

/// Repository trait for call rows.
///
/// Rows arrive in batches identified by a content checksum. Storing a batch
/// whose checksum is already known is a no-op.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CallsRepository: Send + Sync {
    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a batch of rows.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - `n` rows stored
    /// * `Ok(None)` - a batch with the same checksum was stored before
    async fn store_call_batch(
        &self,
        checksum: &str,
        records: &[CallRecord],
    ) -> RepositoryResult<Option<usize>>;

    /// Whether a batch with this checksum has been stored.
    async fn has_batch(&self, checksum: &str) -> RepositoryResult<bool>;

    /// All rows for one company, ordered by year and month.
    ///
    /// # Errors
    /// `NotFound` when the company has no rows.
    async fn fetch_company_records(&self, company_id: CompanyId)
        -> RepositoryResult<Vec<CallRecord>>;

    /// Total number of stored rows.
    async fn count_records(&self) -> RepositoryResult<usize>;
}
