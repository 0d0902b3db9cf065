use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::CompanyId;

/// Repository trait for the company catalogue.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Ids of every company with at least one row, ascending.
    async fn list_company_ids(&self) -> RepositoryResult<Vec<CompanyId>>;
}
