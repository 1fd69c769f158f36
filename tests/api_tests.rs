//! API integration tests
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use range_records::api::{router, AppState};
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(AppState {
        version: "0.1.0-test".to_string(),
    }))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(request).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

// ═══════════════════════════════════════════════════════════════════════════
// INFO ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
    assert_eq!(body["request_id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_version_uses_state() {
    let (_, body) = get("/version").await;
    assert_eq!(body["data"]["version"], json!("0.1.0-test"));
    assert_eq!(
        body["data"]["features"],
        json!(["validate", "records", "extract"])
    );
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (_, body) = get("/").await;
    let endpoints = body["data"]["endpoints"].as_array().unwrap();
    assert!(endpoints
        .iter()
        .any(|e| e["path"] == json!("/api/v1/extract")));
}

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATE / RECORDS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_validate_endpoint() {
    let (status, body) = post(
        "/api/v1/validate",
        json!({"column_range": "Sheet1!A1:D1", "row_range": "Sheet1!A2:D5"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"valid": true, "errors": []}));

    let (_, body) = post(
        "/api/v1/validate",
        json!({"column_range": "", "row_range": "A1:A1"}),
    )
    .await;
    assert_eq!(
        body["data"],
        json!({"valid": false, "errors": ["Range format is incorrect"]})
    );
}

#[tokio::test]
async fn test_validate_rejects_missing_fields() {
    let (status, _) = post("/api/v1/validate", json!({"column_range": "A1"})).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_records_endpoint() {
    let (_, body) = post(
        "/api/v1/records",
        json!({
            "headers": ["Name", "Name", "Age"],
            "rows": [["Alice", "Smith", 30], ["Bob"]]
        }),
    )
    .await;

    assert_eq!(body["data"]["count"], json!(2));
    assert_eq!(
        body["data"]["records"],
        json!([{"Name": "Smith", "Age": 30}, {"Name": "Bob"}])
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// EXTRACT
// ═══════════════════════════════════════════════════════════════════════════

fn write_workbook(dir: &TempDir) -> String {
    let path = dir.path().join("scores.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Scores").unwrap();
    sheet.write_string(0, 1, "Player").unwrap();
    sheet.write_string(0, 2, "Points").unwrap();
    sheet.write_string(1, 1, "Ana").unwrap();
    sheet.write_number(1, 2, 12.5).unwrap();
    sheet.write_string(2, 1, "Ben").unwrap();
    sheet.write_boolean(2, 2, false).unwrap();
    workbook.save(&path).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_extract_endpoint() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir);

    let (_, body) = post(
        "/api/v1/extract",
        json!({
            "workbook_path": path,
            "column_range": "Scores!B1:C1",
            "row_range": "Scores!B2:C3"
        }),
    )
    .await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["extracted"], json!(true));
    assert_eq!(
        body["data"]["records"],
        json!([
            {"Player": "Ana", "Points": 12.5},
            {"Player": "Ben", "Points": false}
        ])
    );
}

#[tokio::test]
async fn test_extract_endpoint_validation_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir);

    let (_, body) = post(
        "/api/v1/extract",
        json!({
            "workbook_path": path,
            "column_range": "B1:C2",
            "row_range": "B2:C3",
            "sheet": "Scores"
        }),
    )
    .await;

    assert_eq!(body["data"]["extracted"], json!(false));
    assert_eq!(
        body["data"]["errors"],
        json!(["Column range must be a single row"])
    );
    assert_eq!(body["data"]["records"], json!([]));
}

#[tokio::test]
async fn test_extract_endpoint_missing_workbook() {
    let (_, body) = post(
        "/api/v1/extract",
        json!({
            "workbook_path": "/nonexistent/book.xlsx",
            "column_range": "A1:B1",
            "row_range": "A2:B3"
        }),
    )
    .await;

    assert_eq!(body["success"], json!(false));
    assert!(body.get("data").is_none());
    assert!(body["error"].as_str().is_some());
}
