//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    AnalysisPipeline, CalibrationRepository, CalibrationService, InMemoryRepository,
    JsonFileRepository,
};

/// Uploads are map captures, occasionally large screenshots.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<AnalysisPipeline>,
    pub calibration: Arc<CalibrationService>,
}

/// Create application state from an asset loader.
///
/// The calibration is not loaded from disk here; call
/// [`CalibrationService::load_persisted`] once the runtime is up.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> AppState {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let pipeline = Arc::new(AnalysisPipeline::new(config.clone()));

    let repo: Arc<dyn CalibrationRepository> = match config.calibration_file {
        Some(ref path) => Arc::new(JsonFileRepository::new(path.clone())),
        None => Arc::new(InMemoryRepository::new()),
    };
    let calibration = Arc::new(CalibrationService::new(repo));

    AppState {
        config,
        pipeline,
        calibration,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(handle_analyze))
        .route("/api/report", post(handle_report))
        .route(
            "/api/calibration",
            get(handle_get_calibration)
                .put(handle_put_calibration)
                .delete(handle_delete_calibration),
        )
        .route("/api/calibration/pick", post(handle_pick))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_analyze(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: axum::extract::Query<api::AnalyzeParams>,
    body: axum::body::Bytes,
) -> Result<axum::Json<api::AnalyzeResponse>, ApiError> {
    api::handle_analyze(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.calibration),
        query,
        body,
    )
    .await
}

async fn handle_report(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: axum::extract::Query<api::AnalyzeParams>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_report(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.calibration),
        query,
        body,
    )
    .await
}

async fn handle_get_calibration(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<crate::analysis::Calibration> {
    api::handle_get_calibration(axum::extract::State(state.calibration)).await
}

async fn handle_put_calibration(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: axum::Json<crate::analysis::Calibration>,
) -> axum::Json<crate::analysis::Calibration> {
    api::handle_put_calibration(axum::extract::State(state.calibration), body).await
}

async fn handle_delete_calibration(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::http::StatusCode {
    api::handle_delete_calibration(axum::extract::State(state.calibration)).await
}

async fn handle_pick(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: axum::extract::Query<api::PickParams>,
    body: axum::body::Bytes,
) -> Result<axum::Json<api::PickResponse>, ApiError> {
    api::handle_pick(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.calibration),
        query,
        body,
    )
    .await
}
