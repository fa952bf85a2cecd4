use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::analysis::Calibration;
use crate::error::ApiError;
use crate::models::Category;
use crate::services::{AnalysisPipeline, CalibrationService};

/// Query parameters for the pick endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PickParams {
    /// Category key to calibrate, e.g. "mid_value".
    pub category: String,
    /// Pixel coordinates in the uploaded image.
    pub x: u32,
    pub y: u32,
}

/// Response of the pick endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PickResponse {
    /// The calibrated category key.
    pub category: String,
    /// The RGB color sampled at the requested pixel.
    pub color: [u8; 3],
    /// The calibration after the pick was applied.
    pub calibration: Calibration,
}

/// Read the current calibration
#[utoipa::path(
    get,
    path = "/api/calibration",
    responses(
        (status = 200, description = "Current calibration", body = Calibration),
    ),
    tag = "Calibration"
)]
pub async fn handle_get_calibration(
    State(calibration): State<Arc<CalibrationService>>,
) -> Json<Calibration> {
    Json(calibration.get().await)
}

/// Merge-update the calibration
///
/// Categories present in the body replace their current reference color,
/// absent categories are untouched.
#[utoipa::path(
    put,
    path = "/api/calibration",
    request_body = Calibration,
    responses(
        (status = 200, description = "Calibration after the update", body = Calibration),
    ),
    tag = "Calibration"
)]
pub async fn handle_put_calibration(
    State(calibration): State<Arc<CalibrationService>>,
    Json(partial): Json<Calibration>,
) -> Json<Calibration> {
    Json(calibration.update(&partial).await)
}

/// Clear the calibration
#[utoipa::path(
    delete,
    path = "/api/calibration",
    responses(
        (status = 204, description = "Calibration cleared"),
    ),
    tag = "Calibration"
)]
pub async fn handle_delete_calibration(
    State(calibration): State<Arc<CalibrationService>>,
) -> StatusCode {
    calibration.clear().await;
    StatusCode::NO_CONTENT
}

/// Calibrate one category from a pixel
///
/// The request body is the image being calibrated against; the sampled
/// pixel becomes the category's reference color.
#[utoipa::path(
    post,
    path = "/api/calibration/pick",
    request_body(content = Vec<u8>, description = "Image bytes (PNG, JPEG or WebP)", content_type = "application/octet-stream"),
    params(PickParams),
    responses(
        (status = 200, description = "Updated calibration", body = PickResponse),
        (status = 400, description = "Unknown category or pixel outside the image"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Calibration"
)]
pub async fn handle_pick(
    State(pipeline): State<Arc<AnalysisPipeline>>,
    State(calibration): State<Arc<CalibrationService>>,
    Query(params): Query<PickParams>,
    body: Bytes,
) -> Result<Json<PickResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyImage);
    }
    let category = Category::from_key(&params.category)
        .ok_or_else(|| ApiError::UnknownCategory(params.category.clone()))?;

    let buffer = pipeline.decode(&body)?;
    let color = buffer.rgb_at(params.x, params.y).ok_or(ApiError::PixelOutOfBounds {
        x: params.x,
        y: params.y,
    })?;

    let updated = calibration.set_entry(category, color).await;
    tracing::info!(
        category = category.key(),
        r = color[0],
        g = color[1],
        b = color[2],
        "Calibrated reference color"
    );

    Ok(Json(PickResponse {
        category: category.key().to_string(),
        color,
        calibration: updated,
    }))
}
