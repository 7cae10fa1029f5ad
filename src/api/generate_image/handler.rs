// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use tracing::{debug, error, info, warn};

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /generate - Generate an image from a text prompt
///
/// Empty prompt -> 400. Upstream, download and unexpected failures -> 500
/// with the failure message. On success the image is already on disk.
pub async fn generate_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected generation request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    debug!(
        "Image generation request received: prompt_len={}, style={}, use_enhancement={}",
        request.prompt().len(),
        request.style(),
        request.use_enhancement()
    );

    let result = state
        .service
        .generate(request.prompt(), request.style(), request.use_enhancement())
        .await
        .map_err(|e| {
            if e.is_client_error() {
                warn!("Image generation rejected: {}", e);
            } else {
                error!("Error generating image: {}", e);
            }
            ApiError::from(e)
        })?;

    info!("Image generated: {}", result.image);
    Ok(Json(GenerateImageResponse::from(result)))
}
