// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Downloads generated images into the output directory

use chrono::Local;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::error::GenerationError;

/// Extension used when the source URL does not provide one
pub const FALLBACK_EXTENSION: &str = "png";

/// How saved images are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNaming {
    /// Last path segment of the source URL. Two URLs with the same basename
    /// overwrite each other.
    #[default]
    UrlBasename,
    /// Truncated SHA-256 of the image bytes
    ContentHash,
}

impl FromStr for FileNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" | "basename" => Ok(FileNaming::UrlBasename),
            "hash" | "content-hash" => Ok(FileNaming::ContentHash),
            other => Err(format!(
                "unknown file naming '{}'; expected 'url' or 'hash'",
                other
            )),
        }
    }
}

/// Reduce an untrusted name to `[A-Za-z0-9._-]` without leading dots.
/// Returns `None` if nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Sanitized final path segment of `url`; a trailing slash yields `None`
pub fn url_basename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    sanitize_filename(segment)
}

/// `output_YYYYmmdd_HHMMSS.png` in local time
pub fn timestamp_filename() -> String {
    format!(
        "output_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        FALLBACK_EXTENSION
    )
}

/// Filename for an image downloaded from `url`
pub fn derive_filename(url: &str) -> String {
    url_basename(url).unwrap_or_else(timestamp_filename)
}

/// Content-addressed filename; extension taken from the URL when it has one
pub fn hashed_filename(bytes: &[u8], url: &str) -> String {
    let digest = Sha256::digest(bytes);
    let extension = url_basename(url)
        .and_then(|name| {
            Path::new(&name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase())
        })
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{}.{}", hex::encode(&digest[..16]), extension)
}

/// Retrieves remote images and persists them locally
pub struct ImageFetcher {
    client: Client,
    naming: FileNaming,
}

impl ImageFetcher {
    pub fn new(naming: FileNaming, timeout: Option<Duration>) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            naming,
        })
    }

    pub fn naming(&self) -> FileNaming {
        self.naming
    }

    /// Download `url` into `dest_dir` and return the written path.
    ///
    /// The directory is created if missing. An existing file with the same
    /// name is overwritten.
    pub async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, GenerationError> {
        tokio::fs::create_dir_all(dest_dir).await?;

        let retrieval = |source| GenerationError::Retrieval {
            url: url.to_string(),
            source,
        };

        debug!("Image download GET {}", url);
        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .map_err(retrieval)?
            .error_for_status()
            .map_err(retrieval)?
            .bytes()
            .await
            .map_err(retrieval)?;

        let filename = match self.naming {
            FileNaming::UrlBasename => derive_filename(url),
            FileNaming::ContentHash => hashed_filename(&bytes, url),
        };
        let path = dest_dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;

        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
