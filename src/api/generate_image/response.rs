// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation response type

use serde::{Deserialize, Serialize};

use crate::diffusion::GenerationResult;

/// Response from image generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateImageResponse {
    /// Always true; failures use the error body instead
    pub success: bool,
    /// Filename servable at /outputs/{image}
    pub image: String,
    /// Prompt sent to the model, null when enhancement was off
    pub enhanced_prompt: Option<String>,
    pub original_prompt: String,
    pub style: String,
}

impl From<GenerationResult> for GenerateImageResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            image: result.image,
            enhanced_prompt: result.enhanced_prompt,
            original_prompt: result.original_prompt,
            style: result.style,
        }
    }
}
