// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service names, environment variable names, defaults, and fixed plan texts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than being kept in a
//! single flat namespace.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP service
    pub const FITPLAN_SERVER: &str = "fitplan-server";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
}

/// API routes
pub mod routes {
    /// Plan generation route
    pub const GENERATE_PLAN: &str = "/generate-plan";
    /// Liveness route
    pub const HEALTH: &str = "/health";
    /// Readiness route
    pub const READY: &str = "/ready";
}

/// Environment variable names read by the server configuration
pub mod env_config {
    /// Bind address
    pub const HTTP_HOST: &str = "HTTP_HOST";
    /// Bind port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Comma separated list of allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// LLM provider selection (gemini, local, none)
    pub const LLM_PROVIDER: &str = "FITPLAN_LLM_PROVIDER";
    /// Model override for the selected provider
    pub const LLM_MODEL: &str = "FITPLAN_LLM_MODEL";
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Base URL of an OpenAI-compatible server
    pub const LOCAL_LLM_BASE_URL: &str = "LOCAL_LLM_BASE_URL";
    /// Optional bearer key for an OpenAI-compatible server
    pub const LOCAL_LLM_API_KEY: &str = "LOCAL_LLM_API_KEY";
    /// Model served by the OpenAI-compatible server
    pub const LOCAL_LLM_MODEL: &str = "LOCAL_LLM_MODEL";
    /// Maximum accepted request body in bytes
    pub const MAX_REQUEST_BODY_BYTES: &str = "MAX_REQUEST_BODY_BYTES";
}

/// Default limits
pub mod limits {
    /// Default maximum request body size (64 KiB is plenty for a profile form)
    pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
    /// Exercises per active day when no experience level is given
    pub const DEFAULT_EXERCISES_PER_DAY: usize = 3;
    /// Number of days in a weekly plan
    pub const DAYS_PER_WEEK: usize = 7;
}

/// Fixed texts of the rule-based fallback plan
pub mod fallback_text {
    /// Focus label for days the user did not make available
    pub const REST_DAY_FOCUS: &str = "Rest Day";
    /// Recovery suggestion on rest days
    pub const REST_DAY_ACTIVITY: &str = "Light walk or stretching";
    /// Duration of the recovery suggestion
    pub const REST_DAY_DETAILS: &str = "20 minutes";
    /// Placeholder for fields that do not apply
    pub const NOT_APPLICABLE: &str = "N/A";
    /// Warm-up on active days
    pub const ACTIVE_WARM_UP: &str = "5 minutes of light cardio (jogging in place).";
    /// Cool-down on active days
    pub const ACTIVE_COOL_DOWN: &str = "5 minutes of full-body stretching.";
    /// Introduction attached to every fallback response
    pub const INTRODUCTION: &str = "The AI service is currently unavailable. \
        Here is a standard fallback plan based on your experience level.";
}
