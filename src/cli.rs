// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AppConfig, DEFAULT_LISTEN_ADDR, DEFAULT_OUTPUT_DIR};
use crate::diffusion::client::{DEFAULT_API_BASE_URL, DEFAULT_MODEL_ID};
use crate::diffusion::fetcher::FileNaming;
use crate::gallery::retention::RetentionPolicy;

/// Prompt Canvas image generation server
#[derive(Parser, Debug, Clone)]
#[command(name = "prompt-canvas")]
#[command(version)]
#[command(about = "Style-enhanced text-to-image web backend", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Bytez API key
    #[arg(long, env = "BYTEZ_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Bytez API base URL
    #[arg(long, env = "BYTEZ_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Model used for every generation
    #[arg(long, env = "BYTEZ_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Directory for generated images
    #[arg(long, env = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Saved image naming: "url" (source basename) or "hash" (content hash)
    #[arg(long, env = "FILE_NAMING", default_value = "url")]
    pub file_naming: FileNaming,

    /// Keep at most this many images
    #[arg(long, env = "MAX_IMAGES")]
    pub max_images: Option<usize>,

    /// Delete images older than this many hours
    #[arg(long, env = "MAX_IMAGE_AGE_HOURS")]
    pub max_age_hours: Option<u64>,

    /// Timeout for model and download requests
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            listen_addr: self.listen_addr,
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            model_id: self.model_id,
            output_dir: self.output_dir,
            file_naming: self.file_naming,
            retention: RetentionPolicy {
                max_images: self.max_images,
                max_age: self
                    .max_age_hours
                    .map(|hours| Duration::from_secs(hours.saturating_mul(3600))),
            },
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
