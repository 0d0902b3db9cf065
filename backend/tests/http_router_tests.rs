//! Router tests driven through `tower::ServiceExt::oneshot`.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use calls_inflection::db::{FullRepository, LocalRepository};
use calls_inflection::http::{create_router, AppState};

use support::{sinusoid_counts, year_of_records, SINUSOID};

fn app_with(repo: LocalRepository) -> Router {
    create_router(AppState::new(Arc::new(repo) as Arc<dyn FullRepository>))
}

fn seeded_app() -> Router {
    let mut rows = year_of_records(1, 2022, sinusoid_counts());
    rows.extend(year_of_records(1, 2023, sinusoid_counts()));
    app_with(LocalRepository::with_records(rows))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app_with(LocalRepository::new()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_unhealthy_repository() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let (status, body) = send(app_with(repo), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_list_and_get_company() {
    let app = seeded_app();
    let (status, body) = send(app.clone(), get("/v1/companies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["companies"][0]["company_id"], 1);
    assert_eq!(body["companies"][0]["total_calls"], 2400);

    let (status, body) = send(app, get("/v1/companies/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_year"], 2022);
    assert_eq!(body["last_year"], 2023);
}

#[tokio::test]
async fn test_company_analysis() {
    let (status, body) = send(
        seeded_app(),
        get("/v1/companies/1/analysis?mode=absolute&strategy=hybrid&separation=3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let series = &body["series"];
    assert_eq!(series["mode"], "absolute");
    assert_eq!(series["diagnosis"]["category"], "normal");
    assert_eq!(series["transitions"].as_array().unwrap().len(), 4);
    assert_eq!(series["transitions"][0]["from"], "v1");
    assert_eq!(series["transitions"][0]["to"], "p1");
    assert_eq!(series["transitions"][0]["midpoint"], 1.5);
    assert_eq!(series["midpoint_marks"][0]["type"], "transition");
    assert_eq!(body["annual_rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["counts"][3], 300);
}

#[tokio::test]
async fn test_analysis_of_unknown_company_is_404() {
    let (status, body) = send(seeded_app(), get("/v1/companies/99/analysis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_out_of_range_separation_is_400() {
    let (status, body) = send(
        seeded_app(),
        get("/v1/companies/1/analysis?strategy=hybrid&separation=6"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SERIES");
}

#[tokio::test]
async fn test_annual_endpoint() {
    let (status, body) = send(seeded_app(), get("/v1/companies/1/annual?mode=percentage")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["is_historical"], true);
    assert_eq!(rows[2]["year"], Value::Null);
    assert_eq!(body["breakdown"]["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_analyze_raw_series() {
    let (status, body) = send(
        app_with(LocalRepository::new()),
        post_json("/v1/analyze", &json!({ "values": SINUSOID, "strategy": "strict" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"]["strategy"], "strict");
    assert_eq!(body["extrema"]["peaks"].as_array().unwrap().len(), 2);
    assert_eq!(body["extrema"]["valleys"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_short_series_is_400() {
    let (status, body) = send(
        app_with(LocalRepository::new()),
        post_json("/v1/analyze", &json!({ "values": [1.0, 2.0, 3.0] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SERIES");
}

#[tokio::test]
async fn test_store_calls_then_duplicate() {
    let app = app_with(LocalRepository::new());
    let rows = json!({
        "calls": [
            {"company_id": "7", "company_name": "Vandelay", "location_state": "NY",
             "year": 2021, "month": 1, "calls": 10, "distinct_campaigns": 2, "distinct_customers": 4},
            {"company_id": 7, "company_name": "Vandelay", "state": "NY",
             "year": 2010, "month": 2, "calls": 5}
        ]
    });

    let (status, body) = send(app.clone(), post_json("/v1/calls", &rows)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["received"], 2);
    assert_eq!(body["stored"], 1);
    assert_eq!(body["dropped"], 1);
    assert_eq!(body["duplicate"], false);

    let (status, body) = send(app.clone(), post_json("/v1/calls", &rows)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duplicate"], true);

    let (_, body) = send(app, get("/v1/companies")).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_store_calls_with_bad_month_is_400() {
    let rows = json!([
        {"company_id": 7, "company_name": "Vandelay", "year": 2021, "month": 13, "calls": 10}
    ]);
    let (status, body) = send(app_with(LocalRepository::new()), post_json("/v1/calls", &rows)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("calls[0].month"));
}

#[tokio::test]
async fn test_analyze_negative_value_is_400() {
    let mut values = SINUSOID.to_vec();
    values[4] = -1.0;
    let (status, body) = send(
        app_with(LocalRepository::new()),
        post_json("/v1/analyze", &json!({ "values": values, "mode": "absolute" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SERIES");
}
