// ABOUTME: Plan generation service that asks the AI provider first and falls back to rules
// ABOUTME: Owns prompt dispatch, JSON extraction, payload validation, and fallback wrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation Service
//!
//! A request moves through two states:
//!
//! 1. **Remote attempt**: render the profile into the plan prompt, send one
//!    completion request, cut the first `{` to last `}` span out of the reply
//!    and parse it as a [`GeneratedPlan`].
//! 2. **Fallback**: on any failure in step 1, build a rule-based plan with
//!    [`FallbackPlanBuilder`] and wrap it in a [`FallbackPlanResponse`].
//!
//! There is no retry and no timeout around the remote call. The fallback path
//! cannot fail, so [`PlanGenerationService::generate`] always yields a plan.

use std::sync::Arc;
use std::time::Instant;

use fitplan_planner::FallbackPlanBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::fallback_text::INTRODUCTION;
use crate::errors::{AppError, ErrorCode};
use crate::llm::prompts::{plan_system_prompt, render_plan_prompt};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{UserProfile, WeeklyPlan};

/// Sampling temperature for plan generation
const PLAN_TEMPERATURE: f32 = 0.7;

// ============================================================================
// Payload Types
// ============================================================================

/// Macronutrient split as percentage strings ("40%")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein share
    #[serde(default)]
    pub protein: String,
    /// Carbohydrate share
    #[serde(default)]
    pub carbs: String,
    /// Fat share
    #[serde(default)]
    pub fat: String,
}

/// One sample meal per main meal of the day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealExamples {
    /// Breakfast idea
    #[serde(default)]
    pub breakfast: String,
    /// Lunch idea
    #[serde(default)]
    pub lunch: String,
    /// Dinner idea
    #[serde(default)]
    pub dinner: String,
}

/// Diet section of an AI-generated plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryRecommendations {
    /// Dietary approach for the user's goal
    #[serde(default)]
    pub summary: String,
    /// Daily calorie range, e.g. "2200-2400 kcal"
    #[serde(default)]
    pub calorie_target: String,
    /// Macronutrient split
    #[serde(default)]
    pub macro_split: MacroSplit,
    /// Sample meals
    #[serde(default)]
    pub meal_examples: MealExamples,
}

/// Plan returned by the AI provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Personalized opening message
    #[serde(default)]
    pub introduction: String,
    /// Diet guidance, when the model produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_recommendations: Option<DietaryRecommendations>,
    /// Day-by-day workouts
    pub weekly_plan: WeeklyPlan,
}

/// Rule-based plan served when AI generation fails
///
/// Sent with HTTP 500. The body is a complete, renderable plan; clients must
/// not discard it because of the status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackPlanResponse {
    /// Notice that the AI service was unavailable
    pub introduction: String,
    /// Day-by-day workouts for all seven days
    pub weekly_plan: WeeklyPlan,
}

impl FallbackPlanResponse {
    /// Wrap a rule-based plan with the standard notice
    #[must_use]
    pub fn new(weekly_plan: WeeklyPlan) -> Self {
        Self {
            introduction: INTRODUCTION.to_owned(),
            weekly_plan,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why the remote attempt did not produce a plan
#[derive(Debug, Error)]
pub enum PlanGenerationError {
    /// No provider is configured
    #[error("no LLM provider is configured")]
    NoProvider,
    /// The provider call failed
    #[error("LLM provider request failed: {0}")]
    Remote(#[source] AppError),
    /// The reply contained no `{...}` span
    #[error("AI response did not contain a JSON object")]
    NoJsonObject,
    /// The extracted span is not a valid plan payload
    #[error("AI response is not a valid plan: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// The payload parsed but has no days
    #[error("AI response contains an empty weekly plan")]
    EmptyWeeklyPlan,
}

impl PlanGenerationError {
    /// Short machine-friendly label for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoProvider => "no_provider",
            Self::Remote(_) => "remote_error",
            Self::NoJsonObject => "no_json_object",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::EmptyWeeklyPlan => "empty_weekly_plan",
        }
    }
}

impl From<PlanGenerationError> for AppError {
    fn from(error: PlanGenerationError) -> Self {
        match error {
            PlanGenerationError::NoProvider => {
                Self::new(ErrorCode::ExternalServiceUnavailable, error.to_string())
            }
            PlanGenerationError::Remote(inner) => inner,
            PlanGenerationError::NoJsonObject | PlanGenerationError::EmptyWeeklyPlan => {
                Self::external_response_invalid(error.to_string())
            }
            PlanGenerationError::InvalidPayload(source) => {
                let message = format!("AI response is not a valid plan: {source}");
                Self::external_response_invalid(message).with_source(source)
            }
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a plan request
#[derive(Debug)]
pub enum PlanOutcome {
    /// The AI provider produced a plan
    Generated(GeneratedPlan),
    /// The rule-based plan, with the reason the remote attempt failed
    Fallback {
        /// Plan to send to the client
        plan: FallbackPlanResponse,
        /// Why the remote attempt failed
        reason: PlanGenerationError,
    },
}

impl PlanOutcome {
    /// Whether the fallback path was taken
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The weekly plan in either case
    #[must_use]
    pub const fn weekly_plan(&self) -> &WeeklyPlan {
        match self {
            Self::Generated(plan) => &plan.weekly_plan,
            Self::Fallback { plan, .. } => &plan.weekly_plan,
        }
    }
}

// ============================================================================
// JSON Extraction
// ============================================================================

/// Slice from the first `{` to the last `}` inclusive
///
/// Models often wrap the object in markdown fences or commentary. Returns
/// `None` when either brace is missing or they are out of order.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a raw model reply into a plan
///
/// # Errors
///
/// Returns `NoJsonObject` when no object span exists, `InvalidPayload` when it
/// does not deserialize, and `EmptyWeeklyPlan` when the plan has no days.
pub fn parse_generated_plan(text: &str) -> Result<GeneratedPlan, PlanGenerationError> {
    let json = extract_json_object(text).ok_or(PlanGenerationError::NoJsonObject)?;
    let plan: GeneratedPlan = serde_json::from_str(json)?;
    if plan.weekly_plan.is_empty() {
        return Err(PlanGenerationError::EmptyWeeklyPlan);
    }
    Ok(plan)
}

// ============================================================================
// Service
// ============================================================================

/// Generates weekly plans, remote first with a rule-based fallback
#[derive(Clone)]
pub struct PlanGenerationService {
    provider: Option<Arc<dyn LlmProvider>>,
    builder: FallbackPlanBuilder,
}

impl PlanGenerationService {
    /// Create a service; `None` means every request takes the fallback path
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            provider,
            builder: FallbackPlanBuilder::new(),
        }
    }

    /// Replace the fallback builder
    #[must_use]
    pub fn with_fallback_builder(mut self, builder: FallbackPlanBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Name of the configured provider, if any
    #[must_use]
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|provider| provider.name())
    }

    /// Produce a plan for `profile`
    ///
    /// Never fails: any remote problem is logged and answered with the
    /// rule-based plan.
    pub async fn generate(&self, profile: &UserProfile) -> PlanOutcome {
        let started = Instant::now();

        match self.request_remote(profile).await {
            Ok(plan) => {
                AppLogger::log_plan_generated(
                    self.provider_name().unwrap_or("unknown"),
                    plan.weekly_plan.active_days().count(),
                    elapsed_ms(started),
                );
                PlanOutcome::Generated(plan)
            }
            Err(reason) => {
                let plan = self.fallback(profile);
                AppLogger::log_plan_fallback(
                    &reason.to_string(),
                    plan.weekly_plan.active_days().count(),
                    elapsed_ms(started),
                );
                PlanOutcome::Fallback { plan, reason }
            }
        }
    }

    /// Build the rule-based plan for `profile`
    #[must_use]
    pub fn fallback(&self, profile: &UserProfile) -> FallbackPlanResponse {
        FallbackPlanResponse::new(self.builder.build(profile))
    }

    async fn request_remote(
        &self,
        profile: &UserProfile,
    ) -> Result<GeneratedPlan, PlanGenerationError> {
        let provider = self.provider.as_ref().ok_or(PlanGenerationError::NoProvider)?;

        let request = ChatRequest::new(vec![
            ChatMessage::system(plan_system_prompt()),
            ChatMessage::user(render_plan_prompt(profile)),
        ])
        .with_temperature(PLAN_TEMPERATURE)
        .with_json_mode();

        info!(
            provider = provider.name(),
            model = %provider.default_model(),
            "Requesting weekly plan from LLM provider"
        );

        let response = provider
            .complete(&request)
            .await
            .map_err(PlanGenerationError::Remote)?;

        debug!(
            reply_len = response.content.len(),
            finish_reason = ?response.finish_reason,
            "LLM provider replied"
        );

        parse_generated_plan(&response.content)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_strips_fences() {
        let text = "Sure! Here is your plan:\n```json\n{\"a\": {\"b\": 1}}\n```\nEnjoy.";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_missing_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("only { open"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }

    #[test]
    fn test_parse_generated_plan_errors() {
        assert!(matches!(
            parse_generated_plan("I cannot help with that."),
            Err(PlanGenerationError::NoJsonObject)
        ));
        assert!(matches!(
            parse_generated_plan("{\"introduction\": \"hi\"}"),
            Err(PlanGenerationError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_generated_plan("{\"introduction\": \"hi\", \"weeklyPlan\": {}}"),
            Err(PlanGenerationError::EmptyWeeklyPlan)
        ));
    }

    #[test]
    fn test_parse_generated_plan_tolerates_missing_optional_fields() {
        let text = r#"```json
        {
          "introduction": "Let's go",
          "weeklyPlan": {
            "monday": {"focus": "Push", "exercises": [{"name": "Bench", "details": "3x8"}]}
          }
        }
        ```"#;
        let plan = parse_generated_plan(text).unwrap();
        assert!(plan.dietary_recommendations.is_none());
        assert_eq!(plan.weekly_plan.len(), 1);
    }

    #[test]
    fn test_error_conversion_codes() {
        let err: AppError = PlanGenerationError::NoJsonObject.into();
        assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
        let err: AppError = PlanGenerationError::NoProvider.into();
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    }
}
