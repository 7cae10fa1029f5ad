// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the image generation pipeline

use thiserror::Error;

/// Errors that can terminate a generation request.
///
/// Every variant is terminal: nothing is retried and no partial result is
/// returned. Only [`GenerationError::EmptyPrompt`] is a client error.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Prompt missing or empty
    #[error("Prompt is required")]
    EmptyPrompt,

    /// The model service reported a failure; the message is passed through as-is
    #[error("{0}")]
    Upstream(String),

    /// The model service returned neither an image reference nor an error
    #[error("No image generated")]
    NoOutput,

    /// Downloading the generated image failed
    #[error("failed to download image from {url}: {source}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Transport or decoding failure talking to the model service
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Writing to the output directory failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Whether the caller, rather than the server or upstream, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, GenerationError::EmptyPrompt)
    }
}
