// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /generate

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use prompt_canvas::api::{create_app, AppState, GenerateImageRequest};
use prompt_canvas::diffusion::prompt_styles::{find_style, QUALITY_SUFFIX};
use prompt_canvas::diffusion::ModelOutput;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use crate::support::{model_returning, service_with, spawn_image_host, MockModel};

fn app_with(model: MockModel, output_dir: &Path) -> Router {
    create_app(AppState::new(service_with(model, output_dir)))
}

fn idle_app(output_dir: &Path) -> Router {
    let mut model = MockModel::new();
    model.expect_run().times(0);
    app_with(model, output_dir)
}

async fn post_generate(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Request parsing
// ============================================================================

#[test]
fn test_request_defaults() {
    let req: GenerateImageRequest = serde_json::from_str(r#"{"prompt": "a cat"}"#).unwrap();
    assert_eq!(req.prompt(), "a cat");
    assert_eq!(req.style(), "realistic");
    assert!(req.use_enhancement());
}

#[test]
fn test_request_null_fields_use_defaults() {
    let req: GenerateImageRequest =
        serde_json::from_str(r#"{"prompt": null, "style": null, "use_enhancement": null}"#)
            .unwrap();
    assert_eq!(req.prompt(), "");
    assert_eq!(req.style(), "realistic");
    assert!(req.use_enhancement());
}

#[test]
fn test_request_all_fields() {
    let req: GenerateImageRequest =
        serde_json::from_str(r#"{"prompt": "a cat", "style": "anime", "use_enhancement": false}"#)
            .unwrap();
    assert_eq!(req.style(), "anime");
    assert!(!req.use_enhancement());
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_empty_prompt_returns_400() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = post_generate(idle_app(tmp.path()), r#"{"prompt": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Prompt is required"}));
}

#[tokio::test]
async fn test_missing_prompt_returns_400() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = post_generate(idle_app(tmp.path()), r#"{"style": "anime"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Prompt is required"}));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = post_generate(idle_app(tmp.path()), r#"{"prompt": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_successful_generation() {
    let host = spawn_image_host().await;
    let tmp = TempDir::new().unwrap();
    let model = model_returning(ModelOutput::image(format!("{}/test.png", host)));

    let (status, body) = post_generate(
        app_with(model, tmp.path()),
        r#"{"prompt": "a lighthouse at dusk"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["image"], "test.png");
    assert_eq!(body["original_prompt"], "a lighthouse at dusk");
    assert_eq!(body["style"], "realistic");

    let realistic = find_style("realistic").unwrap();
    let enhanced = body["enhanced_prompt"].as_str().unwrap();
    assert!(enhanced.starts_with(realistic.prefix));
    assert!(enhanced.ends_with(QUALITY_SUFFIX));

    assert!(tmp.path().join("test.png").exists());
}

#[tokio::test]
async fn test_generation_without_enhancement() {
    let host = spawn_image_host().await;
    let tmp = TempDir::new().unwrap();
    let model = model_returning(ModelOutput::image(format!("{}/plain.png", host)));

    let (status, body) = post_generate(
        app_with(model, tmp.path()),
        r#"{"prompt": "a cat", "style": "Anime", "use_enhancement": false}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enhanced_prompt"], Value::Null);
    assert_eq!(body["style"], "Anime");
    assert_eq!(body["image"], "plain.png");
}

#[tokio::test]
async fn test_upstream_error_returns_500() {
    let tmp = TempDir::new().unwrap();
    let model = model_returning(ModelOutput::failed("model overloaded"));

    let (status, body) = post_generate(app_with(model, tmp.path()), r#"{"prompt": "a cat"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "model overloaded"}));
}

#[tokio::test]
async fn test_no_image_returns_500() {
    let tmp = TempDir::new().unwrap();
    let model = model_returning(ModelOutput::default());

    let (status, body) = post_generate(app_with(model, tmp.path()), r#"{"prompt": "a cat"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "No image generated"}));
}

#[tokio::test]
async fn test_download_failure_returns_500() {
    let host = spawn_image_host().await;
    let tmp = TempDir::new().unwrap();
    let model = model_returning(ModelOutput::image(format!("{}/missing.png", host)));

    let (status, body) = post_generate(app_with(model, tmp.path()), r#"{"prompt": "a cat"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("failed to download image"));
}
