// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod diffusion;
pub mod gallery;

pub use api::{create_app, AppState};
pub use config::AppConfig;
pub use diffusion::{GenerationError, GenerationResult, GenerationService};
