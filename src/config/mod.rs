// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server, CORS, and LLM provider configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Fitplan server
//!
//! All settings come from environment variables; there is no configuration
//! file. See [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, LlmConfig, LlmProviderKind, ServerConfig};
