//! Web API for the design store.
//!
//! All responses are JSON (except the BOM download). Failures use the envelope
//! `{"success": false, "error": "..."}` with a 400, 404 or 500 status.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/designs` - List stored designs, most recently updated first
//! - `POST /api/designs` - Create a design from `{title, data}`
//! - `GET /api/designs/{id}` - Fetch a design including its data
//! - `PUT /api/designs/{id}` - Replace a design's title and data
//! - `DELETE /api/designs/{id}` - Delete a design
//! - `GET /api/designs/{id}/safety` - Structural safety report for a stored design
//! - `GET /api/designs/{id}/bom` - Bill of materials as CSV

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::constants::{APP_NAME, SERVICE_NAME};
use crate::export::generate_bom_csv;
use crate::persistence::{DesignRecord, DesignStore, DesignSummary, StoreError};
use crate::safety::{evaluate_snapshot, SafetyReport};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Design records on disk
    store: Arc<DesignStore>,
}

impl AppState {
    /// Creates the state, opening (and creating) the designs directory.
    pub fn new(designs_dir: PathBuf) -> anyhow::Result<Self> {
        let store = DesignStore::open(&designs_dir).map_err(|e| {
            anyhow::anyhow!(
                "Failed to open designs directory {}: {e}",
                designs_dir.display()
            )
        })?;
        Ok(Self {
            store: Arc::new(store),
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,
    /// Current time (RFC 3339)
    pub timestamp: String,
    /// Service name
    pub service: String,
}

/// Body of create and update requests.
///
/// Both fields are loosely typed so that wrong types are reported with the
/// same validation messages as missing values.
#[derive(Debug, Default, Deserialize)]
pub struct DesignRequest {
    /// Design title
    #[serde(default)]
    pub title: Value,
    /// Design document
    #[serde(default)]
    pub data: Value,
}

impl DesignRequest {
    fn title(&self) -> Option<&str> {
        self.title.as_str()
    }
}

/// Design list response.
#[derive(Debug, Serialize)]
pub struct DesignListResponse {
    /// Always true
    pub success: bool,
    /// Stored designs
    pub designs: Vec<DesignSummary>,
}

/// Response to create and update.
#[derive(Debug, Serialize)]
pub struct DesignResponse {
    /// Always true
    pub success: bool,
    /// The written design, without data
    pub design: DesignSummary,
}

/// Response to a single-design fetch.
#[derive(Debug, Serialize)]
pub struct DesignDetailResponse {
    /// Always true
    pub success: bool,
    /// The stored design, with data
    pub design: DesignRecord,
}

/// Response to delete.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always true
    pub success: bool,
}

/// Safety report for a stored design.
#[derive(Debug, Serialize)]
pub struct SafetyResponse {
    /// Always true
    pub success: bool,
    /// Evaluator output
    pub report: SafetyReport,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Always false
    pub success: bool,
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Maps a store error to a response; `failure` is the message for internal errors.
fn store_failure(e: StoreError, failure: &str) -> (StatusCode, Json<ApiError>) {
    match e {
        StoreError::NotFound => (StatusCode::NOT_FOUND, Json(ApiError::new(e.to_string()))),
        StoreError::Validation(message) => (StatusCode::BAD_REQUEST, Json(ApiError::new(message))),
        StoreError::Io(_) | StoreError::Serialization(_) => {
            error!("{failure}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details(failure, e.to_string())),
            )
        }
    }
}

fn request_body(
    body: Result<Json<DesignRequest>, JsonRejection>,
) -> ApiResult<DesignRequest> {
    body.map(|Json(request)| request).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid request body", e.body_text())),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /api/designs - List designs.
async fn list_designs(State(state): State<AppState>) -> ApiResult<Json<DesignListResponse>> {
    let designs = state
        .store
        .list()
        .map_err(|e| store_failure(e, "Failed to fetch designs"))?;
    Ok(Json(DesignListResponse {
        success: true,
        designs,
    }))
}

/// POST /api/designs - Create a design.
async fn create_design(
    State(state): State<AppState>,
    body: Result<Json<DesignRequest>, JsonRejection>,
) -> ApiResult<Json<DesignResponse>> {
    let request = request_body(body)?;
    let record = state
        .store
        .create(request.title(), request.data.clone())
        .map_err(|e| store_failure(e, "Failed to create design"))?;
    Ok(Json(DesignResponse {
        success: true,
        design: record.summary(),
    }))
}

/// GET /api/designs/{id} - Fetch one design.
async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DesignDetailResponse>> {
    let design = state
        .store
        .get(&id)
        .map_err(|e| store_failure(e, "Failed to fetch design"))?;
    Ok(Json(DesignDetailResponse {
        success: true,
        design,
    }))
}

/// PUT /api/designs/{id} - Update a design.
async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DesignRequest>, JsonRejection>,
) -> ApiResult<Json<DesignResponse>> {
    let request = request_body(body)?;
    let record = state
        .store
        .update(&id, request.title(), request.data.clone())
        .map_err(|e| store_failure(e, "Failed to update design"))?;
    Ok(Json(DesignResponse {
        success: true,
        design: record.summary(),
    }))
}

/// DELETE /api/designs/{id} - Delete a design.
async fn delete_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .store
        .delete(&id)
        .map_err(|e| store_failure(e, "Failed to delete design"))?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/designs/{id}/safety - Evaluate a stored design.
async fn design_safety(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SafetyResponse>> {
    let record = state
        .store
        .get(&id)
        .map_err(|e| store_failure(e, "Failed to fetch design"))?;
    let report = evaluate_snapshot(&record.parsed().into_snapshot());
    Ok(Json(SafetyResponse {
        success: true,
        report,
    }))
}

/// GET /api/designs/{id}/bom - Bill of materials for a stored design.
async fn design_bom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<([(header::HeaderName, &'static str); 1], String)> {
    let record = state
        .store
        .get(&id)
        .map_err(|e| store_failure(e, "Failed to fetch design"))?;
    let csv = generate_bom_csv(&record.parsed().into_snapshot());
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run next to a locally served frontend, so any
    // origin is accepted.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/designs", get(list_designs).post(create_design))
        .route(
            "/api/designs/{id}",
            get(get_design).put(update_design).delete(delete_design),
        )
        .route("/api/designs/{id}/safety", get(design_safety))
        .route("/api/designs/{id}/bom", get(design_bom))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `designs_dir` - Directory holding one JSON file per design
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the designs directory cannot be created or the server
/// fails to start.
pub async fn run_server(designs_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(designs_dir)?;
    let app = create_router(state);

    info!("Starting {} API on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
