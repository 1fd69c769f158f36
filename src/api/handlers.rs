//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::core::{build_records, validate_ranges};
use crate::host::WorkbookHost;
use crate::panel::ExtractionPanel;
use crate::types::{CellValue, Record};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "range-records API Server".to_string(),
        version: state.version.clone(),
        description: "Validate spreadsheet ranges and convert rows to records".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/validate",
                "POST",
                "Check a header range against a data range",
            ),
            EndpointInfo::new(
                "/api/v1/records",
                "POST",
                "Build records from header values and data rows",
            ),
            EndpointInfo::new(
                "/api/v1/extract",
                "POST",
                "Validate and extract records from a workbook file",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "validate".to_string(),
            "records".to_string(),
            "extract".to_string(),
        ],
    }))
}

/// Validate request
#[derive(Deserialize)]
pub struct ValidateRequest {
    pub column_range: String,
    pub row_range: String,
}

/// Validate response
#[derive(Serialize, Default)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// POST /api/v1/validate - Check range compatibility
pub async fn validate(Json(req): Json<ValidateRequest>) -> impl IntoResponse {
    let result = validate_ranges(&req.column_range, &req.row_range);
    Json(ApiResponse::ok(ValidateResponse {
        valid: result.is_valid(),
        errors: result.errors,
    }))
}

/// Records request - values already read from the host
#[derive(Deserialize)]
pub struct RecordsRequest {
    pub headers: Vec<CellValue>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

/// Records response
#[derive(Serialize, Default)]
pub struct RecordsResponse {
    pub count: usize,
    pub records: Vec<Record>,
}

/// POST /api/v1/records - Zip rows against headers
pub async fn records(Json(req): Json<RecordsRequest>) -> impl IntoResponse {
    let records = build_records(&req.headers, &req.rows);
    Json(ApiResponse::ok(RecordsResponse {
        count: records.len(),
        records,
    }))
}

/// Extract request
#[derive(Deserialize)]
pub struct ExtractRequest {
    pub workbook_path: String,
    pub column_range: String,
    pub row_range: String,
    /// Active sheet for unqualified addresses (defaults to the first sheet)
    #[serde(default)]
    pub sheet: Option<String>,
}

/// Extract response
#[derive(Serialize, Default)]
pub struct ExtractResponse {
    pub extracted: bool,
    pub errors: Vec<String>,
    pub records: Vec<Record>,
}

/// POST /api/v1/extract - Run the extraction panel against a workbook file
pub async fn extract(Json(req): Json<ExtractRequest>) -> impl IntoResponse {
    let mut host = match WorkbookHost::open(&req.workbook_path) {
        Ok(host) => host,
        Err(e) => {
            warn!(path = %req.workbook_path, error = %e, "cannot open workbook");
            return Json(ApiResponse::<ExtractResponse>::err(e.to_string()));
        }
    };
    if let Some(ref sheet) = req.sheet {
        if let Err(e) = host.activate(sheet) {
            return Json(ApiResponse::err(e.to_string()));
        }
    }

    let mut panel = ExtractionPanel::new(host);
    panel.set_column_range(req.column_range);
    panel.set_row_range(req.row_range);

    let response = match panel.extract().await {
        Some(records) => ExtractResponse {
            extracted: true,
            errors: Vec::new(),
            records,
        },
        None => ExtractResponse {
            extracted: false,
            errors: panel.errors().to_vec(),
            records: Vec::new(),
        },
    };
    Json(ApiResponse::ok(response))
}
