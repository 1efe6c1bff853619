// ABOUTME: LLM provider abstraction layer for pluggable AI model integration
// ABOUTME: Defines the completion contract, message types, and provider selection from config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Service Provider Interface
//!
//! This module defines the contract that LLM providers implement to generate
//! weekly plans. Plan generation only needs a single non-streaming completion,
//! so the trait is deliberately small.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features (JSON mode)
//! - **`LlmProvider`**: Async trait for chat completion
//! - **`ChatMessage`**: Role-based message structure
//! - **`ChatRequest`**: Request configuration including model, temperature, and JSON mode
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use fitplan_server::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let messages = vec![
//!         ChatMessage::system("You are a personal trainer."),
//!         ChatMessage::user("Plan my week."),
//!     ];
//!
//!     let request = ChatRequest::new(messages).with_json_mode();
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
mod openai_compatible;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::environment::{LlmConfig, LlmProviderKind};
use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    ///
    /// Used to decide how a request is shaped for a given provider.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider can be asked to emit a JSON document only
        const JSON_MODE = 0b0000_0001;
    }
}

impl LlmCapabilities {
    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Ask the provider for a bare JSON document
    pub json_mode: bool,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            json_mode: false,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request JSON-only output
    ///
    /// Providers without [`LlmCapabilities::JSON_MODE`] ignore the flag.
    #[must_use]
    pub const fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
///
/// Implement this trait to plug a new model backend into plan generation.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini", "ollama")
    fn name(&self) -> &'static str;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

// ============================================================================
// Provider Selection
// ============================================================================

/// Build the configured provider
///
/// Returns `Ok(None)` when no provider is selected, or when Gemini is selected
/// without an API key. The server still runs in that case and every plan comes
/// from the rule-based fallback.
///
/// # Errors
///
/// Returns an error if the HTTP client for a provider cannot be created.
pub fn provider_from_config(config: &LlmConfig) -> Result<Option<Arc<dyn LlmProvider>>, AppError> {
    match config.provider {
        LlmProviderKind::None => {
            info!("No LLM provider configured, all plans will use the fallback builder");
            Ok(None)
        }
        LlmProviderKind::Gemini => {
            let Some(api_key) = config.gemini_api_key.as_deref() else {
                warn!("GEMINI_API_KEY is not set, all plans will use the fallback builder");
                return Ok(None);
            };
            let mut provider = GeminiProvider::new(api_key);
            if let Some(model) = &config.model {
                provider = provider.with_default_model(model);
            }
            info!(model = %provider.default_model(), "Gemini provider configured");
            Ok(Some(Arc::new(provider)))
        }
        LlmProviderKind::Local => {
            let mut provider_config = OpenAiCompatibleConfig::from_base_url(&config.local_base_url);
            provider_config.api_key.clone_from(&config.local_api_key);
            if let Some(model) = config.local_model.as_ref().or(config.model.as_ref()) {
                provider_config.default_model.clone_from(model);
            }
            let provider = OpenAiCompatibleProvider::new(provider_config)?;
            info!(
                provider = provider.name(),
                model = %provider.default_model(),
                "OpenAI-compatible provider configured"
            );
            Ok(Some(Arc::new(provider)))
        }
    }
}
