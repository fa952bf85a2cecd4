use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image data provided")]
    EmptyImage,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Pixel ({x}, {y}) is outside the image")]
    PixelOutOfBounds { x: u32, y: u32 },

    #[error("Could not analyze the image")]
    Analysis(#[from] AnalysisError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures turning an upload into a pixel buffer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::EmptyImage => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownCategory(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::PixelOutOfBounds { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            // The decode detail stays in the log; clients get the generic
            // message so corrupt uploads cannot probe the decoder.
            ApiError::Analysis(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
