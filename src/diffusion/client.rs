// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for the hosted model-serving API (Bytez)

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::error::GenerationError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.bytez.com";
pub const DEFAULT_MODEL_ID: &str = "John6666/mumix-xl-v20-sdxl";

/// Normalized result of a model run.
///
/// Both result shapes the service can return are folded into this type right
/// after the call, so nothing downstream inspects raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub output_url: Option<String>,
    pub error: Option<String>,
}

impl ModelOutput {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            output_url: Some(url.into()),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            output_url: None,
            error: Some(message.into()),
        }
    }

    /// Normalize a raw response body.
    ///
    /// Accepts the mapping shape `{"output": "<url>", "error": "<msg>"}` and
    /// the attribute shape where `output` is an object (or list of objects)
    /// carrying a `url` and `error` is an object carrying a `message`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                output_url: map.get("output").and_then(output_reference),
                error: map.get("error").and_then(error_message),
            },
            Value::String(s) if !s.is_empty() => Self::image(s.clone()),
            _ => Self::default(),
        }
    }
}

fn output_reference(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("uri"))
            .and_then(output_reference),
        Value::Array(items) => items.iter().find_map(output_reference),
        _ => None,
    }
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => Some(value.to_string()),
        },
        _ => None,
    }
}

/// A model that turns a prompt into an image reference
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run the model once. Upstream-reported failures come back inside
    /// [`ModelOutput::error`]; `Err` is reserved for transport problems.
    async fn run(&self, prompt: &str) -> Result<ModelOutput, GenerationError>;
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    text: &'a str,
}

/// Bytez model API client
pub struct BytezClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_id: String,
}

impl BytezClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model_id: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Model client configured: endpoint={}, model={}",
            endpoint, model_id
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model_id: model_id.to_string(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Full URL of the run endpoint for the configured model
    pub fn run_url(&self) -> String {
        format!("{}/models/v2/{}", self.endpoint, self.model_id)
    }
}

#[async_trait]
impl ModelClient for BytezClient {
    async fn run(&self, prompt: &str) -> Result<ModelOutput, GenerationError> {
        let url = self.run_url();
        debug!("Model run POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Key {}", self.api_key))
            .json(&RunRequest { text: prompt })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&body)
            .ok()
            .map(|value| ModelOutput::from_value(&value));

        if !status.is_success() {
            // Prefer the service's own error text over the bare status
            if let Some(output) = parsed.filter(|o| o.error.is_some()) {
                return Ok(output);
            }
            return Err(GenerationError::Upstream(format!(
                "model service returned {}: {}",
                status, body
            )));
        }

        parsed.ok_or_else(|| {
            GenerationError::Upstream(format!("model service returned a non-JSON body: {}", body))
        })
    }
}
