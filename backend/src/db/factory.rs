//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use log::info;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositorySettings;
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::services;
use crate::models::{CallRecord, DataWindow};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Unset or unrecognised values fall back to Local.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use calls_inflection::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local);
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn FullRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    pub fn from_env() -> Arc<dyn FullRepository> {
        Self::create(RepositoryType::from_env())
    }

    /// Create repository from the `[repository]` settings, loading the seed
    /// file when one is configured.
    ///
    /// # Errors
    /// `ConfigurationError` for an unknown type or an unreadable seed file.
    pub async fn from_settings(
        settings: &RepositorySettings,
        window: &DataWindow,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let mut builder = RepositoryBuilder::new()
            .repository_type(settings.repository_type()?)
            .window(*window);
        if let Some(path) = &settings.seed_file {
            builder = builder.seed_file(path)?;
        }
        builder.build().await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```
/// use calls_inflection::db::{CallsRepository, RepositoryBuilder, RepositoryType};
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .build()
///     .await
///     .unwrap();
/// assert!(repo.health_check().await.unwrap());
/// # }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    window: DataWindow,
    seed: Vec<CallRecord>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            window: DataWindow::default(),
            seed: Vec::new(),
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Window applied to seed rows.
    pub fn window(mut self, window: DataWindow) -> Self {
        self.window = window;
        self
    }

    /// Add rows to store once the repository is built.
    pub fn seed_records(mut self, records: Vec<CallRecord>) -> Self {
        self.seed.extend(records);
        self
    }

    /// Read seed rows from a JSON file.
    pub fn seed_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, RepositoryError> {
        let records = crate::parsing::parse_calls_json(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to load seed file {}: {:#}",
                path.as_ref().display(),
                e
            ))
        })?;
        self.seed.extend(records);
        Ok(self)
    }

    /// Build the repository instance and store any seed rows.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = RepositoryFactory::create(self.repo_type);
        if !self.seed.is_empty() {
            let summary = services::store_call_records(repo.as_ref(), self.seed, &self.window).await?;
            info!(
                "Seeded repository: {} stored, {} outside window",
                summary.stored, summary.dropped
            );
        }
        Ok(repo)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
