//! Storage for monthly call rows.
//!
//! Rows are stored in batches keyed by checksum and read back per company.
//! Callers go through [`services`], which applies the ingestion window, rather
//! than calling the repository traits directly.
//!
//! - `repository`: `CallsRepository` and `CatalogRepository` traits
//! - `repositories::local`: the in-memory store
//! - `factory`: builds a store from `[repository]` settings and seeds it
//!
//! # Usage
//!
//! ```no_run
//! use calls_inflection::db::{factory::RepositoryFactory, services};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepositoryFactory::create_local();
//! let companies = services::list_company_ids(repo.as_ref()).await?;
//! # let _ = companies;
//! # Ok(())
//! # }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{fetch_company_records, health_check, list_company_ids, store_call_records};

// ==================== Repository Pattern Exports ====================

pub use checksum::checksum_records;
pub use repo_config::RepositorySettings;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    CallsRepository, CatalogRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult,
};
