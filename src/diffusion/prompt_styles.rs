// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Style presets and quality-keyword prompt enhancement

/// A named style with the quality keywords prepended to user prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub key: &'static str,
    pub prefix: &'static str,
}

/// Style used when the requested style is unknown
pub const DEFAULT_STYLE: &str = "realistic";

/// Appended to every enhanced prompt
pub const QUALITY_SUFFIX: &str = ", detailed, high resolution, professional, pristine quality";

/// Preset table. Order is the order reported by `GET /styles`.
pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        key: "realistic",
        prefix: "masterpiece, best quality, ultra detailed, 8k uhd, professional photography, DSLR, sharp focus, perfect lighting, photorealistic, ",
    },
    StylePreset {
        key: "artistic",
        prefix: "masterpiece, best quality, highly detailed, professional artwork, trending on artstation, award winning, vibrant colors, intricate details, ",
    },
    StylePreset {
        key: "anime",
        prefix: "masterpiece, best quality, highly detailed, anime style, official art, vivid colors, perfect anatomy, beautiful lighting, ",
    },
    StylePreset {
        key: "cinematic",
        prefix: "masterpiece, best quality, cinematic lighting, dramatic, epic composition, movie still, professional color grading, ",
    },
    StylePreset {
        key: "fantasy",
        prefix: "masterpiece, best quality, fantasy art, highly detailed, magical atmosphere, epic, stunning visuals, professional illustration, ",
    },
    StylePreset {
        key: "portrait",
        prefix: "masterpiece, best quality, professional portrait, sharp focus, studio lighting, detailed face, perfect skin, high resolution, ",
    },
    StylePreset {
        key: "landscape",
        prefix: "masterpiece, best quality, breathtaking landscape, professional photography, golden hour lighting, vivid colors, ultra sharp, ",
    },
];

/// Look up a preset by key, ignoring case
pub fn find_style(style: &str) -> Option<&'static StylePreset> {
    let lower = style.to_lowercase();
    STYLE_PRESETS.iter().find(|preset| preset.key == lower)
}

/// The default preset
pub fn default_style() -> &'static StylePreset {
    &STYLE_PRESETS[0]
}

/// All preset keys in table order
pub fn style_keys() -> Vec<&'static str> {
    STYLE_PRESETS.iter().map(|preset| preset.key).collect()
}

/// Decorate a user prompt with the quality keywords of `style`.
///
/// Unknown styles fall back to [`DEFAULT_STYLE`]. The user text is kept
/// verbatim between the style prefix and [`QUALITY_SUFFIX`].
pub fn enhance_prompt(user_prompt: &str, style: &str) -> String {
    let preset = find_style(style).unwrap_or_else(default_style);
    format!("{}{}{}", preset.prefix, user_prompt, QUALITY_SUFFIX)
}
