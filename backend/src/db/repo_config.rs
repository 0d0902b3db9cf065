//! Repository section of the configuration file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{RepositoryError, RepositoryResult};

/// `[repository]` settings.
///
/// ```toml
/// [repository]
/// type = "local"
/// seed_file = "data/calls.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// JSON file of call rows loaded into the repository at startup.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            seed_file: None,
        }
    }
}

impl RepositorySettings {
    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> RepositoryResult<RepositoryType> {
        RepositoryType::from_str(&self.repo_type).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }
}
