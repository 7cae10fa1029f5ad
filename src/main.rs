// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use prompt_canvas::{
    api::{start_server, AppState},
    cli::Cli,
    diffusion::{style_keys, GenerationService},
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Cli::parse().into_config();
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    info!(
        "Starting prompt-canvas {} (model={}, styles={})",
        env!("CARGO_PKG_VERSION"),
        config.model_id,
        style_keys().join(",")
    );
    if config.retention.is_unbounded() {
        info!("Retention: keeping all generated images");
    } else {
        info!(
            "Retention: max_images={:?}, max_age={:?}",
            config.retention.max_images, config.retention.max_age
        );
    }

    let service = GenerationService::from_config(&config)?;
    start_server(&config, AppState::new(service)).await
}
