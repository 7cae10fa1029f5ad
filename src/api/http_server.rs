// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use super::generate_image::generate_image_handler;
use super::handlers::{
    gallery_handler, health_handler, index_handler, serve_output_handler, styles_handler,
};
use crate::config::AppConfig;
use crate::diffusion::GenerationService;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(service: GenerationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/styles", get(styles_handler))
        .route("/generate", post(generate_image_handler))
        .route("/gallery", get(gallery_handler))
        .route("/outputs/:filename", get(serve_output_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: &AppConfig, state: AppState) -> Result<()> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    info!("Serving images from {}", config.output_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
