// ABOUTME: Generic OpenAI-compatible LLM provider for local and hosted endpoints
// ABOUTME: Supports Ollama, vLLM, LocalAI, and any server exposing /chat/completions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Generic implementation for any `OpenAI`-compatible chat completions endpoint,
//! which lets plans be generated by a local model server.
//!
//! ## Configuration
//!
//! - `LOCAL_LLM_BASE_URL`: Base URL (default: <http://localhost:11434/v1> for Ollama)
//! - `LOCAL_LLM_MODEL`: Model to use (default: `qwen2.5:14b-instruct`)
//! - `LOCAL_LLM_API_KEY`: API key (optional, empty for local servers)

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::errors::{AppError, ErrorCode};

/// Default base URL (Ollama)
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
pub const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Service name used in error messages
const SERVICE_NAME: &str = "LocalLLM";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

/// Output format constraint
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: String,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Configuration for a server at `base_url`, recognizing well-known local ports
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let provider_name = if base_url.contains(":11434") {
            "ollama"
        } else if base_url.contains(":8000") {
            "vllm"
        } else if base_url.contains(":8080") {
            "localai"
        } else {
            "local"
        };

        Self {
            base_url: base_url.to_owned(),
            provider_name: provider_name.to_owned(),
            ..Self::default()
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_owned(),
            provider_name: "local".to_owned(),
            capabilities: LlmCapabilities::JSON_MODE,
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Build the wire request for a chat completion
    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let response_format = (request.json_mode && self.config.capabilities.supports_json_mode())
            .then_some(ResponseFormat {
                format_type: "json_object",
            });

        OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            response_format,
            stream: false,
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let message = error_response.error.message;
            match status.as_u16() {
                401 | 403 => AppError::new(
                    ErrorCode::ExternalAuthFailed,
                    format!("API authentication failed: {message}"),
                ),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    "LLM rate limit reached. Please wait a moment and try again.",
                ),
                _ => {
                    let error_type = error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned());
                    AppError::external_service(
                        SERVICE_NAME,
                        format!("{error_type} ({status}) - {message}"),
                    )
                }
            }
        } else {
            // Local servers often answer errors with plain text
            match status.as_u16() {
                502..=504 => AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    "Local LLM server is not responding. Is Ollama/vLLM running?",
                ),
                _ => AppError::external_service(
                    SERVICE_NAME,
                    format!(
                        "API error ({status}): {}",
                        body.chars().take(200).collect::<String>()
                    ),
                ),
            }
        }
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }

    /// Map a transport failure to an error
    fn map_send_error(&self, e: &reqwest::Error) -> AppError {
        error!(provider = %self.config.provider_name, error = %e, "Request to LLM server failed");
        if e.is_connect() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!(
                    "Cannot connect to {}. Is the server running at {}?",
                    self.config.provider_name, self.config.base_url
                ),
            )
        } else {
            AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        match self.config.provider_name.as_str() {
            "ollama" => "ollama",
            "vllm" => "vllm",
            "localai" => "localai",
            _ => "local",
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.provider_name))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let openai_request = self.build_request(request);

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_response_invalid(format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_response_invalid("API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received chat completion"
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
