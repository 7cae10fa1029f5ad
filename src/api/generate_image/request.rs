// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request type

use serde::{Deserialize, Serialize};

use crate::diffusion::DEFAULT_STYLE;

/// Request for image generation via POST /generate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: Option<String>,

    /// Style preset key (defaults to "realistic")
    #[serde(default)]
    pub style: Option<String>,

    /// Whether to add the style's quality keywords (defaults to true)
    #[serde(default)]
    pub use_enhancement: Option<bool>,
}

impl GenerateImageRequest {
    /// Prompt text; missing and null read as empty
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or("")
    }

    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_STYLE)
    }

    pub fn use_enhancement(&self) -> bool {
        self.use_enhancement.unwrap_or(true)
    }
}
