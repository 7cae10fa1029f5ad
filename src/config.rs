// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-wide configuration, built once at startup

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::diffusion::client::{DEFAULT_API_BASE_URL, DEFAULT_MODEL_ID};
use crate::diffusion::fetcher::FileNaming;
use crate::gallery::retention::RetentionPolicy;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Model service API key
    pub api_key: String,
    /// Model service base URL
    pub api_base_url: String,
    /// Model identifier sent with every run
    pub model_id: String,
    /// Where generated images are stored and served from
    pub output_dir: PathBuf,
    pub file_naming: FileNaming,
    pub retention: RetentionPolicy,
    /// Outbound HTTP timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_naming: FileNaming::default(),
            retention: RetentionPolicy::default(),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key must be set (BYTEZ_API_KEY)".to_string());
        }
        if self.model_id.trim().is_empty() {
            return Err("Model id must not be empty".to_string());
        }
        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!(
                    "API base URL must be http or https, got '{}'",
                    url.scheme()
                ))
            }
            Err(e) => return Err(format!("invalid API base URL '{}': {}", self.api_base_url, e)),
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory must not be empty".to_string());
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err("Request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
