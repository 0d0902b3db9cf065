//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies for analysis endpoints are the [`crate::api`] types, which
//! already derive Serialize. This module only adds request shapes and small
//! envelope responses.

use serde::{Deserialize, Serialize};

use crate::algorithms::StrategyKind;
use crate::models::AnalysisMode;

pub use crate::api::{AnnualData, CompanyInfo, InflectionAnalysis, IngestSummary, SeriesAnalysis};

/// Query parameters for the company analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisQuery {
    /// `percentage` or `absolute` (default from configuration)
    #[serde(default)]
    pub mode: Option<AnalysisMode>,
    /// `sensitive`, `strict` or `hybrid` (default from configuration)
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    /// Minimum months between same-kind extrema; ignored by `strict`
    #[serde(default)]
    pub separation: Option<usize>,
}

/// Query parameters for the annual endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnnualQuery {
    #[serde(default)]
    pub mode: Option<AnalysisMode>,
}

/// Request body for analyzing a series that is not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Twelve monthly values, January first
    pub values: Vec<f64>,
    #[serde(default)]
    pub mode: Option<AnalysisMode>,
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    #[serde(default)]
    pub min_separation: Option<usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}

/// Company list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyInfo>,
    pub total: usize,
}

impl From<Vec<CompanyInfo>> for CompanyListResponse {
    fn from(companies: Vec<CompanyInfo>) -> Self {
        Self {
            total: companies.len(),
            companies,
        }
    }
}
