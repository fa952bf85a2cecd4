//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use ytandel::models::AppConfig;
use ytandel::server::{build_router, AppState};
use ytandel::services::{AnalysisPipeline, CalibrationService, InMemoryRepository};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub calibration: Arc<CalibrationService>,
}

impl TestApp {
    /// Create a new test application with default config and volatile
    /// calibration storage, so tests never touch the filesystem.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(mut config: AppConfig) -> Self {
        config.calibration_file = None;
        let config = Arc::new(config);
        let pipeline = Arc::new(AnalysisPipeline::new(config.clone()));
        let calibration = Arc::new(CalibrationService::new(Arc::new(
            InMemoryRepository::new(),
        )));

        let state = AppState {
            config,
            pipeline,
            calibration: calibration.clone(),
        };
        let router = build_router(state);

        Self {
            router,
            calibration,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a raw byte body
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        self.request(
            Request::post(path)
                .header("Content-Type", "application/octet-stream")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Request::put(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
