//! HTTP API
//!
//! Routes, request parameters and shared state for the gateway.

pub mod fields;
pub mod params;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::config::GatewayConfig;
use crate::middleware::logging::log_request;
use crate::session::SessionGateway;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: SessionGateway,
    pub max_upload_size_bytes: usize,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            gateway: SessionGateway::new(&config.ftp),
            max_upload_size_bytes: config.max_upload_size_bytes(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_size_bytes;

    Router::new()
        .route("/file-info", get(routes::handle_file_info))
        .route("/list-files", get(routes::handle_list_files))
        .route("/list-folders", get(routes::handle_list_folders))
        .route("/upload-file", post(routes::handle_upload_file))
        .route("/create-folder", post(routes::handle_create_folder))
        .route("/delete-file", delete(routes::handle_delete_file))
        .route("/delete-folder", delete(routes::handle_delete_folder))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
