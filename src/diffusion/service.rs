// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation pipeline: prompt enhancement, model call, image download

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::client::{BytezClient, ModelClient};
use super::error::GenerationError;
use super::fetcher::ImageFetcher;
use super::prompt_styles::enhance_prompt;
use crate::config::AppConfig;
use crate::gallery::retention::{apply_retention, RetentionPolicy};

/// Outcome of one successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Filename under the output directory
    pub image: String,
    /// Full path of the saved image
    pub path: PathBuf,
    /// Prompt actually sent to the model, if enhancement was on
    pub enhanced_prompt: Option<String>,
    pub original_prompt: String,
    pub style: String,
}

/// Orchestrates a single text-to-image request.
///
/// Each call is one pass with no retries:
/// 1. Reject an empty prompt
/// 2. Enhance the prompt if requested
/// 3. Run the model
/// 4. Upstream error -> fail; image reference -> download; neither -> fail
/// 5. Apply the retention policy, sparing the new image
///
/// With a bounded retention policy, download and pruning run under
/// `write_lock` so one request never prunes an image another request is
/// about to return.
pub struct GenerationService {
    client: Arc<dyn ModelClient>,
    fetcher: ImageFetcher,
    output_dir: PathBuf,
    retention: RetentionPolicy,
    write_lock: Mutex<()>,
}

impl GenerationService {
    pub fn new(
        client: Arc<dyn ModelClient>,
        fetcher: ImageFetcher,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            fetcher,
            output_dir: output_dir.into(),
            retention: RetentionPolicy::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Build the production service (Bytez client) from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = BytezClient::new(
            &config.api_base_url,
            &config.api_key,
            &config.model_id,
            config.request_timeout,
        )?;
        let fetcher = ImageFetcher::new(config.file_naming, config.request_timeout)?;
        Ok(Self::new(Arc::new(client), fetcher, config.output_dir.clone())
            .with_retention(config.retention.clone()))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn retention(&self) -> &RetentionPolicy {
        &self.retention
    }

    pub async fn generate(
        &self,
        prompt: &str,
        style: &str,
        use_enhancement: bool,
    ) -> Result<GenerationResult, GenerationError> {
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let final_prompt = if use_enhancement {
            enhance_prompt(prompt, style)
        } else {
            prompt.to_string()
        };

        info!("Generating with style: {}", style);
        info!("Original prompt: {}", prompt);
        info!("Enhanced prompt: {}", final_prompt);

        let output = self.client.run(&final_prompt).await?;

        if let Some(error) = output.error {
            warn!("Model reported an error: {}", error);
            return Err(GenerationError::Upstream(error));
        }

        let image_url = output.output_url.ok_or(GenerationError::NoOutput)?;
        debug!("Model produced {}", image_url);

        let _guard = if self.retention.is_unbounded() {
            None
        } else {
            Some(self.write_lock.lock().await)
        };

        let path = self.fetcher.fetch(&image_url, &self.output_dir).await?;
        let image = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("saved path has no filename: {}", path.display()),
                )
            })?;

        self.enforce_retention(&image).await;

        Ok(GenerationResult {
            image,
            path,
            enhanced_prompt: use_enhancement.then_some(final_prompt),
            original_prompt: prompt.to_string(),
            style: style.to_string(),
        })
    }

    /// Retention failures never fail the request that triggered them
    async fn enforce_retention(&self, keep: &str) {
        if self.retention.is_unbounded() {
            return;
        }

        let dir = self.output_dir.clone();
        let policy = self.retention.clone();
        let keep = keep.to_string();
        match tokio::task::spawn_blocking(move || apply_retention(&dir, &policy, Some(&keep))).await
        {
            Ok(Ok(removed)) if !removed.is_empty() => {
                info!("Retention removed {} image(s): {:?}", removed.len(), removed);
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!("Retention pass failed: {}", e),
            Err(e) => warn!("Retention task failed: {}", e),
        }
    }
}
