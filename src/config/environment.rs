// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads bind address, CORS, and LLM provider selection from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{env_config, limits, ports};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::OpenAiCompatibleConfig;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if running in production
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which LLM backend generates plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// `OpenAI`-compatible server (Ollama, vLLM, ...)
    Local,
    /// No provider: every request uses the fallback builder
    None,
}

impl LlmProviderKind {
    /// Parse a provider name
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for unknown names.
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "local" | "ollama" | "vllm" | "openai-compatible" => Ok(Self::Local),
            "none" | "off" | "disabled" | "" => Ok(Self::None),
            other => Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "Invalid {} value '{other}': expected gemini, local, or none",
                    env_config::LLM_PROVIDER
                ),
            )),
        }
    }
}

impl fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Local => write!(f, "local"),
            Self::None => write!(f, "none"),
        }
    }
}

/// LLM provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Selected provider
    pub provider: LlmProviderKind,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Model override for the selected provider
    pub model: Option<String>,
    /// Base URL of the `OpenAI`-compatible server
    pub local_base_url: String,
    /// Bearer key for the `OpenAI`-compatible server
    pub local_api_key: Option<String>,
    /// Model served by the `OpenAI`-compatible server
    pub local_model: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            gemini_api_key: None,
            model: None,
            local_base_url: OpenAiCompatibleConfig::default().base_url,
            local_api_key: None,
            local_model: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("local_base_url", &self.local_base_url)
            .field("local_api_key", &self.local_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("local_model", &self.local_model)
            .finish()
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma separated allowed origins, or "*"
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub http_host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// CORS settings
    pub cors: CorsConfig,
    /// LLM provider settings
    pub llm: LlmConfig,
    /// Largest accepted request body
    pub max_request_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: ports::DEFAULT_HTTP_HOST.to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            cors: CorsConfig::default(),
            llm: LlmConfig::default(),
            max_request_body_bytes: limits::DEFAULT_MAX_REQUEST_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric variable does not parse or the
    /// provider name is unknown.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let defaults = Self::default();

        let llm = LlmConfig {
            provider: env_var_opt(env_config::LLM_PROVIDER)
                .map_or(Ok(defaults.llm.provider), |raw| LlmProviderKind::parse(&raw))?,
            gemini_api_key: env_var_opt(env_config::GEMINI_API_KEY),
            model: env_var_opt(env_config::LLM_MODEL),
            local_base_url: env_var_or(
                env_config::LOCAL_LLM_BASE_URL,
                &defaults.llm.local_base_url,
            ),
            local_api_key: env_var_opt(env_config::LOCAL_LLM_API_KEY),
            local_model: env_var_opt(env_config::LOCAL_LLM_MODEL),
        };

        Ok(Self {
            http_host: env_var_or(env_config::HTTP_HOST, &defaults.http_host),
            http_port: parse_env(env_config::HTTP_PORT, defaults.http_port)?,
            environment: env_var_opt(env_config::ENVIRONMENT)
                .map_or(defaults.environment, |raw| Environment::from_str_or_default(&raw)),
            cors: CorsConfig {
                allowed_origins: env_var_or(
                    env_config::CORS_ALLOWED_ORIGINS,
                    &defaults.cors.allowed_origins,
                ),
            },
            llm,
            max_request_body_bytes: parse_env(
                env_config::MAX_REQUEST_BODY_BYTES,
                defaults.max_request_body_bytes,
            )?,
        })
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Fitplan Server Configuration:\n\
             - Environment: {}\n\
             - Bind Address: {}\n\
             - CORS Origins: {}\n\
             - LLM Provider: {}\n\
             - LLM Model: {}\n\
             - Gemini API Key: {}\n\
             - Max Request Body: {} bytes",
            self.environment,
            self.bind_address(),
            self.cors.allowed_origins,
            self.llm.provider,
            self.llm.model.as_deref().unwrap_or("provider default"),
            if self.llm.gemini_api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.max_request_body_bytes,
        )
    }
}

/// Get a non-empty environment variable
fn env_var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env_var_opt(key).unwrap_or_else(|| default.to_owned())
}

/// Parse a numeric environment variable, falling back to `default` when unset
fn parse_env<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    env_var_opt(key).map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|_| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Invalid {key} value: '{raw}'"),
            )
        })
    })
}
