// ABOUTME: Google Gemini LLM provider implementation
// ABOUTME: Calls generateContent on the Generative Language API with optional JSON output mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `FITPLAN_LLM_MODEL` overrides the default model.
//!
//! ## Supported Models
//!
//! - `gemini-2.5-flash` (default)
//! - `gemini-2.0-flash`
//! - `gemini-1.5-pro`
//! - `gemini-1.5-flash`

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::errors::{AppError, ErrorCode};

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key, never the query string
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Service name used in error messages
const SERVICE_NAME: &str = "Gemini";

/// MIME type requested when JSON mode is on
const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Text part of a content block
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Convert our message role to Gemini's role format
    ///
    /// System messages travel in `systemInstruction`; one that shows up here is
    /// sent as user text.
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Convert chat messages to Gemini format
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            let part = ContentPart {
                text: message.content.clone(),
            };
            if message.role == MessageRole::System {
                system_instruction = Some(GeminiContent {
                    role: None,
                    parts: vec![part],
                });
            } else {
                contents.push(GeminiContent {
                    role: Some(Self::convert_role(message.role).to_owned()),
                    parts: vec![part],
                });
            }
        }

        (contents, system_instruction)
    }

    /// Build a Gemini API request from a `ChatRequest`
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        let response_mime_type = request.json_mode.then_some(JSON_MIME_TYPE);
        let generation_config = (request.temperature.is_some() || response_mime_type.is_some())
            .then_some(GenerationConfig {
                temperature: request.temperature,
                response_mime_type,
            });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Extract text content from Gemini response
    ///
    /// Multiple text parts are concatenated in order.
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .filter(|c| !c.parts.is_empty())
            .ok_or_else(|| AppError::external_response_invalid("No content in Gemini response"))?;

        Ok(content.parts.iter().map(|p| p.text.as_str()).collect())
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key ({status}): {message}"),
            ),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!("API error ({status}): {message}"),
            ),
        }
    }

    /// Extract a user-friendly quota/rate limit message from a Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(seconds) = after_prefix
                .find('s')
                .and_then(|s_pos| after_prefix[..s_pos].parse::<f64>().ok())
            {
                let seconds_int = seconds.ceil() as u64;
                return format!(
                    "AI service quota exceeded. Please try again in {seconds_int} seconds."
                );
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(
        skip(self, request),
        fields(model = %request.model.as_deref().unwrap_or(&self.default_model))
    )]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!(json_mode = request.json_mode, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                AppError::external_service(SERVICE_NAME, format!("HTTP request failed: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            let e = e.without_url();
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_response_invalid(format!(
                    "Failed to parse Gemini response: {e}"
                ))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("API error: {}", error.message),
            ));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(chars = content.len(), "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
