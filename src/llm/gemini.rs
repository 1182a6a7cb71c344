// ABOUTME: Google Gemini provider implementation over the Generative Language API
// ABOUTME: Maps chat requests to generateContent calls and failures to ModelUnavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Gemini Provider
//!
//! Implementation of [`LlmProvider`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with an API key from
//! Google AI Studio. `WOT_LLM_MODEL` overrides the default model.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ChatRequest, ChatResponse, LlmProvider, MessageRole};
use crate::errors::{AppError, AppResult};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini implementation of [`LlmProvider`]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit key, model, and request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        })
    }

    /// Create a provider from `GEMINI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing.
    pub fn from_env(model: Option<String>, timeout: Duration) -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Self::new(api_key, model, timeout)
    }

    /// Map chat messages to the Gemini content format
    ///
    /// System messages become the dedicated `system_instruction` field;
    /// assistant messages use Gemini's "model" role.
    fn build_request(request: &ChatRequest) -> GeminiRequest {
        let mut system_parts: Vec<GeminiPart> = Vec::new();
        let mut contents = Vec::with_capacity(request.messages.len());

        for message in &request.messages {
            match message.role {
                MessageRole::System => system_parts.push(GeminiPart {
                    text: message.content.clone(),
                }),
                MessageRole::User | MessageRole::Assistant => {
                    let role = if message.role == MessageRole::Assistant {
                        "model"
                    } else {
                        "user"
                    };
                    contents.push(GeminiContent {
                        role: Some(role.to_owned()),
                        parts: vec![GeminiPart {
                            text: message.content.clone(),
                        }],
                    });
                }
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: system_parts,
            })
        };

        let generation_config =
            if request.temperature.is_some() || request.max_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_tokens,
                })
            } else {
                None
            };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn display_name(&self) -> &'static str {
        "Gemini"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let url = format!(
            "{API_BASE_URL}/models/{model}:generateContent?key={}",
            self.api_key
        );

        let body = Self::build_request(request);
        debug!("Gemini request: model={model} messages={}", request.messages.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::model_unavailable(format!("Gemini request failed: {e}")).with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Gemini returned {status}: {detail}");
            return Err(AppError::model_unavailable(format!(
                "Gemini returned status {status}"
            )));
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            AppError::model_unavailable(format!("Gemini response decode failed: {e}"))
                .with_source(e)
        })?;

        let content = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| AppError::model_unavailable("Gemini returned no candidates"))?;

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
        })
    }
}
