// ABOUTME: Main library entry point for the Fitplan weekly plan service
// ABOUTME: Wires LLM providers, plan generation, HTTP routes, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitplan Server
//!
//! An HTTP service that turns a user's fitness profile into a seven-day workout
//! and diet plan. Plans are requested from a generative AI model; whenever that
//! fails, a rule-based plan from `fitplan-planner` is returned instead.
//!
//! ## Architecture
//!
//! - **LLM**: provider abstraction with Gemini and `OpenAI`-compatible backends
//! - **Services**: the plan generation state machine (remote attempt, then fallback)
//! - **Routes**: `POST /generate-plan` plus health and readiness probes
//! - **Config**: environment-only server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitplan_server::config::environment::ServerConfig;
//! use fitplan_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fitplan server configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// LLM provider abstraction for plan generation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models for profiles and plans
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server assembly and startup
pub mod server;

/// Business logic services
pub mod services;
