use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::analysis::Profile;
use crate::error::ApiError;
use crate::models::{ProfileMode, ReportRow};
use crate::services::{AnalysisOutcome, AnalysisPipeline, CalibrationService};

/// Query parameters shared by the analyze and report endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeParams {
    /// Original file name of the upload; drives the report file name.
    pub name: Option<String>,
    /// Maximum RGB distance for nearest-reference matching, overriding the
    /// configured default.
    pub tolerance: Option<f32>,
    /// Force "high" or "low" instead of auto-detection.
    pub profile: Option<ProfileMode>,
}

/// Response body of `/api/analyze`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Suggested file name for the report PNG.
    pub out_name: String,
    /// Which profile the classification ran with.
    pub profile: Profile,
    /// Dimensions of the analyzed image.
    pub width: u32,
    pub height: u32,
    /// Legend rows, in table order.
    pub rows: Vec<ReportRow>,
}

/// Fallback upload name when the client does not send one.
const DEFAULT_NAME: &str = "bild.png";

async fn run_pipeline(
    pipeline: &AnalysisPipeline,
    calibration: &CalibrationService,
    params: &AnalyzeParams,
    body: &[u8],
) -> Result<AnalysisOutcome, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyImage);
    }
    let cal = calibration.get().await;
    let name = params.name.as_deref().unwrap_or(DEFAULT_NAME);
    pipeline.run(body, name, &cal, params.tolerance, params.profile)
}

/// Analyze an image
///
/// Classifies every pixel into the land-cover categories and returns the
/// legend table as JSON.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = Vec<u8>, description = "Image bytes (PNG, JPEG or WebP)", content_type = "application/octet-stream"),
    params(AnalyzeParams),
    responses(
        (status = 200, description = "Analysis result", body = AnalyzeResponse),
        (status = 400, description = "Empty request body"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Analysis"
)]
pub async fn handle_analyze(
    State(pipeline): State<Arc<AnalysisPipeline>>,
    State(calibration): State<Arc<CalibrationService>>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let outcome = run_pipeline(&pipeline, &calibration, &params, &body).await?;
    Ok(Json(AnalyzeResponse {
        out_name: outcome.out_name,
        profile: outcome.profile,
        width: outcome.width,
        height: outcome.height,
        rows: outcome.rows,
    }))
}

/// Generate the report image
///
/// Same input as `/api/analyze`, but the response is the composite report
/// PNG as a download.
#[utoipa::path(
    post,
    path = "/api/report",
    request_body(content = Vec<u8>, description = "Image bytes (PNG, JPEG or WebP)", content_type = "application/octet-stream"),
    params(AnalyzeParams),
    responses(
        (status = 200, description = "Report PNG", content_type = "image/png"),
        (status = 400, description = "Empty request body"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Analysis"
)]
pub async fn handle_report(
    State(pipeline): State<Arc<AnalysisPipeline>>,
    State(calibration): State<Arc<CalibrationService>>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let outcome = run_pipeline(&pipeline, &calibration, &params, &body).await?;

    // Header values must be ASCII; anything else in the upload name is
    // replaced, the JSON endpoint still carries the exact name.
    let safe_name: String = outcome
        .out_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{safe_name}\""))
        .map_err(|e| ApiError::Internal(format!("Invalid report file name: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        outcome.png,
    )
        .into_response())
}
