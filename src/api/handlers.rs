// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::errors::ApiError;
use super::http_server::AppState;
use crate::diffusion::fetcher::sanitize_filename;
use crate::diffusion::style_keys;
use crate::gallery::list_images;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StylesResponse {
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryResponse {
    pub images: Vec<String>,
}

// ============================================================================
// Static pages
// ============================================================================

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

// ============================================================================
// Styles and gallery
// ============================================================================

pub async fn styles_handler() -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: style_keys().into_iter().map(str::to_string).collect(),
    })
}

pub async fn gallery_handler(State(state): State<AppState>) -> Result<Json<GalleryResponse>, ApiError> {
    let dir = state.service.output_dir().to_path_buf();
    let images = tokio::task::spawn_blocking(move || list_images(&dir))
        .await
        .map_err(|e| ApiError::InternalError(format!("gallery task failed: {}", e)))?
        .map_err(|e| {
            error!("Failed to list gallery: {}", e);
            ApiError::InternalError(format!("Failed to list images: {}", e))
        })?;

    debug!("Gallery listing: {} image(s)", images.len());
    Ok(Json(GalleryResponse { images }))
}

// ============================================================================
// Generated images
// ============================================================================

/// GET /outputs/{filename}
///
/// Only plain names are served: anything that would not survive
/// `sanitize_filename` unchanged (separators, leading dots) is a 404.
pub async fn serve_output_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if sanitize_filename(&filename).as_deref() != Some(filename.as_str()) {
        warn!("Rejected output filename: {:?}", filename);
        return Err(ApiError::NotFound("Image not found".to_string()));
    }

    let path = state.service.output_dir().join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("Image not found".to_string()));
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Err(ApiError::InternalError(format!("Failed to read image: {}", e)));
        }
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
