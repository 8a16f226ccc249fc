//! Error handlers
//!
//! Converts gateway errors into HTTP status codes and JSON bodies.

use crate::error::types::GatewayError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde_json::json;

/// Log a gateway error at a level matching its severity
pub fn handle_error(err: &GatewayError) {
    match err {
        GatewayError::Validation(_) | GatewayError::NotFound { .. } | GatewayError::NotEmpty(_) => {}
        GatewayError::BadBody { message, .. } => warn!("Unreadable request body: {}", message),
        GatewayError::Connection(cause) => error!("FTP connection failed: {}", cause),
        GatewayError::Remote(e) => warn!("FTP command failed: {}", e),
        GatewayError::Internal(m) => error!("Session worker failed: {}", m),
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::NotEmpty(_) => StatusCode::BAD_REQUEST,
        GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
        GatewayError::BadBody { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        GatewayError::Connection(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GatewayError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = error_to_status(&self);
        let body = match &self {
            GatewayError::NotFound { path } => json!({ "exists": false, "path": path }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
