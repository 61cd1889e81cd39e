//! Request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::html::render_html;
use super::server::AppState;
use crate::core::{assess_database, SensorAssessment};
use crate::error::DashboardError;
use crate::excel::XLSX_MIME;
use crate::view::render_page;

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

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed load or export
pub fn error_status(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::FileNotFound(_) => StatusCode::NOT_FOUND,
        DashboardError::ColumnCountMismatch { .. }
        | DashboardError::MissingField { .. }
        | DashboardError::InvalidCell { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: DashboardError) -> Response {
    warn!(error = %error, "request failed");
    (
        error_status(&error),
        Json(ApiResponse::<()>::err(error.to_string())),
    )
        .into_response()
}

/// GET / - Dashboard page
pub async fn page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_html(&render_page(&state.context)))
}

/// GET /api/v1/dashboard - Page view model as JSON
pub async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(render_page(&state.context)))
}

/// GET /api/v1/sensors - Latest status and classification per sensor
pub async fn sensors(State(state): State<Arc<AppState>>) -> Response {
    match state.context.load_database() {
        Ok(database) => {
            let assessments: Vec<SensorAssessment> = assess_database(&database);
            Json(ApiResponse::ok(assessments)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/download - Normalized sensor database
pub async fn download(State(state): State<Arc<AppState>>) -> Response {
    let exporter = state.context.exporter();

    match exporter.export_bytes() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", exporter.file_name()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
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
            "dashboard".to_string(),
            "sensors".to_string(),
            "download".to_string(),
        ],
    }))
}
