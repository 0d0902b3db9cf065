//! High-level database service layer.
//!
//! Repository-agnostic operations that work with any implementation of the
//! repository traits. Window filtering and checksum deduplication live here so
//! they behave the same regardless of the storage backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, analysis services)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Data window filtering                                │
//! │  - Batch checksum deduplication                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - CallsRepository                                      │
//! │  - CatalogRepository                                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!            ┌────────▼────────────┐
//!            │ Local Repository    │
//!            │ (in-memory)         │
//!            └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use calls_inflection::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let companies = services::list_company_ids(&repo).await?;
//!     println!("Found {} companies", companies.len());
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::checksum::checksum_records;
use super::repository::{CallsRepository, CatalogRepository, FullRepository, RepositoryResult};
use crate::api::{CompanyId, IngestSummary};
use crate::models::{CallRecord, DataWindow};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Call Rows ====================

/// Store call rows with full business logic.
///
/// 1. Drop rows outside `window`
/// 2. Checksum the remaining rows
/// 3. Skip the store when that checksum is already known
///
/// # Returns
/// Counts of received, stored, dropped and the batch checksum.
pub async fn store_call_records<R: FullRepository + ?Sized>(
    repo: &R,
    records: Vec<CallRecord>,
    window: &DataWindow,
) -> RepositoryResult<IngestSummary> {
    let received = records.len();
    let (kept, dropped) = window.apply(records);
    if dropped > 0 {
        warn!(
            "Service layer: dropping {} of {} rows outside {}..{}",
            dropped, received, window.min_year, window.cutoff_date
        );
    }

    let checksum = checksum_records(&kept);
    info!(
        "Service layer: storing {} call rows (checksum {})",
        kept.len(),
        checksum
    );

    let (stored, duplicate) = match repo.store_call_batch(&checksum, &kept).await? {
        Some(stored) => (stored, false),
        None => {
            info!("Service layer: batch {} already stored, skipping", checksum);
            (0, true)
        }
    };

    Ok(IngestSummary {
        received,
        stored,
        dropped,
        duplicate,
        checksum,
    })
}

/// Fetch every row for one company, ordered by year and month.
///
/// # Errors
/// `NotFound` when the company has no rows.
pub async fn fetch_company_records<R: FullRepository + ?Sized>(
    repo: &R,
    company_id: CompanyId,
) -> RepositoryResult<Vec<CallRecord>> {
    repo.fetch_company_records(company_id)
        .await
        .map_err(|e| e.with_operation("fetch_company_records"))
}

// ==================== Catalog ====================

/// List all companies with at least one stored row.
pub async fn list_company_ids<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<CompanyId>> {
    let ids = repo.list_company_ids().await?;
    info!("Service layer: {} companies available", ids.len());
    Ok(ids)
}
