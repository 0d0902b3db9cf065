//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AnalysisQuery, AnalyzeRequest, AnnualQuery, CompanyListResponse, HealthResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AnnualData, CompanyId, CompanyInfo, InflectionAnalysis, IngestSummary, SeriesAnalysis};
use crate::db::services as db_services;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Companies
// =============================================================================

/// GET /v1/companies
pub async fn list_companies(State(state): State<AppState>) -> HandlerResult<CompanyListResponse> {
    let companies = services::list_companies(state.repository.as_ref()).await?;
    Ok(Json(companies.into()))
}

/// GET /v1/companies/{company_id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
) -> HandlerResult<CompanyInfo> {
    let info = services::get_company(state.repository.as_ref(), CompanyId::new(company_id)).await?;
    Ok(Json(info))
}

// =============================================================================
// Analysis
// =============================================================================

/// GET /v1/companies/{company_id}/analysis
///
/// Inflection points, pattern diagnosis, transitions and annual aggregates for
/// one company. Missing query parameters fall back to the configured defaults.
pub async fn get_inflection_analysis(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
    Query(query): Query<AnalysisQuery>,
) -> HandlerResult<InflectionAnalysis> {
    let analysis = &state.config.analysis;
    let mode = analysis.mode(query.mode);
    let strategy = analysis.strategy(query.strategy, query.separation);

    let data = services::get_inflection_analysis(
        state.repository.as_ref(),
        CompanyId::new(company_id),
        mode,
        strategy,
    )
    .await?;

    Ok(Json(data))
}

/// GET /v1/companies/{company_id}/annual
pub async fn get_annual_data(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
    Query(query): Query<AnnualQuery>,
) -> HandlerResult<AnnualData> {
    let mode = state.config.analysis.mode(query.mode);
    let data =
        services::get_annual_data(state.repository.as_ref(), CompanyId::new(company_id), mode)
            .await?;
    Ok(Json(data))
}

/// POST /v1/analyze
///
/// Run the pipeline on a series supplied in the request body.
pub async fn analyze_series(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> HandlerResult<SeriesAnalysis> {
    let analysis = &state.config.analysis;
    let mode = analysis.mode(request.mode);
    let strategy = analysis.strategy(request.strategy, request.min_separation);

    let data = services::analyze_series(&request.values, mode, strategy)?;
    Ok(Json(data))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /v1/calls
///
/// Store call rows. The body is either an array of rows or `{"calls": [...]}`.
/// Returns 201 when rows were stored and 200 for a batch seen before.
pub async fn store_calls(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<IngestSummary>), AppError> {
    let records = crate::parsing::parse_calls_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid call rows: {:#}", e)))?;

    let window = state.config.data.window();
    let summary =
        db_services::store_call_records(state.repository.as_ref(), records, &window).await?;

    let status = if summary.duplicate {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(summary)))
}
