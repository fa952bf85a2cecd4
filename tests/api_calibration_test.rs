//! Tests for the /api/calibration endpoints.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};

#[tokio::test]
async fn test_get_calibration_starts_empty() {
    let app = TestApp::new();

    let response = app.get("/api/calibration").await;
    assert_eq!(response.status, StatusCode::OK);

    let json: serde_json::Value = response.json();
    assert!(json["entries"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_put_calibration_merges_per_category() {
    let app = TestApp::new();

    let response = app
        .put_json("/api/calibration", r#"{"entries":{"mid_value":[1,2,3]}}"#)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .put_json(
            "/api/calibration",
            r#"{"entries":{"dark_high_value":[4,5,6]}}"#,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let json: serde_json::Value = response.json();
    let entries = json["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["mid_value"], serde_json::json!([1, 2, 3]));
    assert_eq!(entries["dark_high_value"], serde_json::json!([4, 5, 6]));
}

#[tokio::test]
async fn test_delete_calibration() {
    let app = TestApp::new();

    app.put_json("/api/calibration", r#"{"entries":{"mid_value":[1,2,3]}}"#)
        .await;

    let response = app.delete("/api/calibration").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let json: serde_json::Value = app.get("/api/calibration").await.json();
    assert!(json["entries"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_pick_samples_pixel_color() {
    let app = TestApp::new();

    // Top-left pixel of the washed-out fixture is (73, 55, 67).
    let response = app
        .post_bytes(
            "/api/calibration/pick?category=mid_value&x=0&y=0",
            fixtures::washed_out_capture(),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let json: serde_json::Value = response.json();
    assert_eq!(json["category"], "mid_value");
    assert_eq!(json["color"], serde_json::json!([73, 55, 67]));
    assert_eq!(
        json["calibration"]["entries"]["mid_value"],
        serde_json::json!([73, 55, 67])
    );
}

#[tokio::test]
async fn test_pick_unknown_category() {
    let app = TestApp::new();

    let response = app
        .post_bytes(
            "/api/calibration/pick?category=magenta&x=0&y=0",
            fixtures::washed_out_capture(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Unknown category: magenta");
}

#[tokio::test]
async fn test_pick_pixel_out_of_bounds() {
    let app = TestApp::new();

    let response = app
        .post_bytes(
            "/api/calibration/pick?category=mid_value&x=99&y=0",
            fixtures::washed_out_capture(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Pixel (99, 0) is outside the image");
}

#[tokio::test]
async fn test_pick_empty_body() {
    let app = TestApp::new();

    let response = app
        .post_bytes("/api/calibration/pick?category=mid_value&x=0&y=0", Vec::new())
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "No image data provided");
}

#[tokio::test]
async fn test_calibration_changes_analysis_result() {
    let app = TestApp::new();

    // A color no default reference matches within tolerance.
    let capture = fixtures::png_from_pixels(&[[200, 120, 180]], 4, 4);

    let before: serde_json::Value = app
        .post_bytes("/api/analyze?profile=low", capture.clone())
        .await
        .json();
    assert_eq!(before["rows"][1]["pct_of_total"], "0.0%");

    // Calibrate mid-value from that very pixel, then re-analyze.
    let response = app
        .post_bytes(
            "/api/calibration/pick?category=mid_value&x=0&y=0",
            capture.clone(),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after: serde_json::Value = app
        .post_bytes("/api/analyze?profile=low", capture)
        .await
        .json();
    assert_eq!(after["rows"][1]["name"], "Mellanlila (Naturvärde)");
    assert_eq!(after["rows"][1]["pct_of_forest"], "100.0%");
    assert_eq!(after["rows"][1]["pct_of_total"], "100.0%");
}
