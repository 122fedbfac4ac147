//! HTTP surface tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use sap_schema_services::config::Config;
use sap_schema_services::services::mock_data::ensure_mock_data;
use sap_schema_services::{app, AppState};

fn state_for(dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = Config {
        data_dir: dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    Arc::new(AppState::new(config))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(state_for(&dir))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_analyze_mock_table() {
    let dir = tempfile::tempdir().unwrap();
    ensure_mock_data(dir.path()).unwrap();

    let response = app(state_for(&dir))
        .oneshot(Request::get("/schema/tables/lfa1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["sap_table_type"], "LFA1");
    assert_eq!(body["file_info"]["total_rows"], 3);
    assert_eq!(body["column_analysis"]["LIFNR"]["sap_patterns"][0], "vendor_number");
    assert_eq!(body["column_analysis"]["SPERR"]["data_category"], "empty");
    assert_eq!(body["query_suggestions"][0], "Show vendors by location");
}

#[tokio::test]
async fn test_unknown_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(state_for(&dir))
        .oneshot(Request::get("/schema/tables/MARA").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("MARA"));
}

#[tokio::test]
async fn test_analyze_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.csv");
    std::fs::write(&path, "KUNNR,NAME1,ORT01\nC001,Global Corp,Boston\nC002,Local Business,Seattle\n").unwrap();

    let request = Request::post("/schema/analyze")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "file_path": path.to_string_lossy(), "sample_size": 100 }).to_string(),
        ))
        .unwrap();
    let response = app(state_for(&dir)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["sap_table_type"], "KNA1");
    assert_eq!(body["file_info"]["analyzed_rows"], 2);
    assert_eq!(body["schema_coverage"]["missing_important"], json!([]));
}

#[tokio::test]
async fn test_analyze_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    let request = Request::post("/schema/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "file_path": missing.to_string_lossy() }).to_string()))
        .unwrap();
    let response = app(state_for(&dir)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_rejects_zero_sample() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::post("/schema/analyze")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "file_path": "x.csv", "sample_size": 0 }).to_string()))
        .unwrap();
    let response = app(state_for(&dir)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_describe_column() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(state_for(&dir))
        .oneshot(
            Request::get("/schema/tables/bseg/columns/dmbtr")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["table"], "BSEG");
    assert_eq!(body["column"], "DMBTR");
    assert_eq!(body["table_description"], "Accounting Document Segment");

    let response = app(state_for(&dir))
        .oneshot(
            Request::get("/schema/tables/bseg/columns/NOPE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
