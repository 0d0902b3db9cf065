//! Routes for the inflection API.
//!
//! `/health` sits at the root; everything else is under `/v1`.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Upload limit for `POST /v1/calls`.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the router with CORS, gzip and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Catalogue
        .route("/companies", get(handlers::list_companies))
        .route("/companies/{company_id}", get(handlers::get_company))
        // Analysis
        .route("/companies/{company_id}/analysis", get(handlers::get_inflection_analysis))
        .route("/companies/{company_id}/annual", get(handlers::get_annual_data))
        .route("/analyze", post(handlers::analyze_series))
        // Ingestion
        .route("/calls", post(handlers::store_calls));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
