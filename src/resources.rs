// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles configuration with the plan generation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::errors::AppResult;
use crate::llm::{provider_from_config, LlmProvider};
use crate::services::PlanGenerationService;

/// Resources shared by all request handlers
///
/// Nothing in here is mutable; concurrent requests share it freely.
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Plan generation service
    pub plan_service: Arc<PlanGenerationService>,
}

impl ServerResources {
    /// Assemble resources with an explicit provider
    #[must_use]
    pub fn new(config: ServerConfig, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            plan_service: Arc::new(PlanGenerationService::new(provider)),
        }
    }

    /// Assemble resources with the provider selected by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's HTTP client cannot be created
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let provider = provider_from_config(&config.llm)?;
        Ok(Self::new(config, provider))
    }
}
