// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image generation via a hosted model-serving API

pub mod client;
pub mod error;
pub mod fetcher;
pub mod prompt_styles;
pub mod service;

pub use client::{BytezClient, ModelClient, ModelOutput};
pub use error::GenerationError;
pub use fetcher::{FileNaming, ImageFetcher};
pub use prompt_styles::{enhance_prompt, style_keys, StylePreset, DEFAULT_STYLE, QUALITY_SUFFIX};
pub use service::{GenerationResult, GenerationService};
