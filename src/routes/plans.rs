// ABOUTME: Route handler for weekly plan generation
// ABOUTME: Validates the profile form, runs plan generation, and maps the outcome to HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan routes
//!
//! `POST /generate-plan` answers with:
//!
//! - `200` and the AI-generated plan,
//! - `500` and a complete rule-based plan when AI generation failed. The body
//!   is a valid plan and clients should render it,
//! - `400` and an error object when the profile is invalid.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::routes;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::middleware::request_id_from_headers;
use crate::models::{ActivityLevel, DayOfWeek, DietPreference, UserProfile};
use crate::resources::ServerResources;
use crate::services::PlanOutcome;

/// Response header naming where the plan came from (`ai` or `fallback`)
pub const PLAN_SOURCE_HEADER: &str = "x-plan-source";

/// Age as sent by the form: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeField {
    /// JSON number
    Number(i64),
    /// Text input value
    Text(String),
}

impl AgeField {
    fn into_age(self) -> AppResult<u32> {
        let value = match self {
            Self::Number(value) => value,
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                AppError::new(
                    ErrorCode::InvalidFormat,
                    format!("age must be a whole number, got '{text}'"),
                )
            })?,
        };

        u32::try_from(value)
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!("age must be a positive number, got {value}"),
                )
            })
    }
}

/// Plan request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Age in years
    #[serde(default)]
    pub age: Option<AgeField>,
    /// Gender
    #[serde(default)]
    pub gender: Option<String>,
    /// Diet preference
    #[serde(default, alias = "diet")]
    pub diet_preference: Option<String>,
    /// Primary goal
    #[serde(default)]
    pub goal: Option<String>,
    /// Activity level
    #[serde(default)]
    pub activity_level: Option<String>,
    /// Experience level
    #[serde(default)]
    pub experience: Option<String>,
    /// Days the user can train
    #[serde(default)]
    pub available_days: Option<Vec<String>>,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Injuries or conditions
    #[serde(default)]
    pub health_notes: Option<String>,
}

impl PlanRequest {
    /// Validate the request into a profile
    ///
    /// # Errors
    ///
    /// Returns a 400-class error for a missing or non-positive age, and for an
    /// absent, empty, duplicated, or unknown `availableDays` entry.
    pub fn into_profile(self) -> AppResult<UserProfile> {
        let age = self
            .age
            .ok_or_else(|| AppError::missing_field("age"))?
            .into_age()?;
        let days = parse_available_days(
            self.available_days
                .ok_or_else(|| AppError::missing_field("availableDays"))?,
        )?;

        let mut profile = UserProfile::new(age, days)?;
        profile.gender = non_blank(self.gender);
        profile.goal = non_blank(self.goal);
        profile.experience = non_blank(self.experience);
        profile.activity_level = self.activity_level.as_deref().and_then(ActivityLevel::parse);
        profile.diet = self
            .diet_preference
            .as_deref()
            .map_or(DietPreference::Unspecified, DietPreference::parse);
        profile.equipment = self
            .equipment
            .into_iter()
            .filter_map(|item| non_blank(Some(item)))
            .collect();
        profile.health_notes = non_blank(self.health_notes);

        Ok(profile)
    }
}

/// Parse day names, rejecting unknown and repeated entries
fn parse_available_days(raw: Vec<String>) -> AppResult<BTreeSet<DayOfWeek>> {
    if raw.is_empty() {
        return Err(AppError::invalid_input(
            "availableDays must contain at least one day",
        ));
    }

    let mut days = BTreeSet::new();
    for name in raw {
        let day: DayOfWeek = name.parse()?;
        if !days.insert(day) {
            return Err(AppError::invalid_input(format!(
                "availableDays lists {day} more than once"
            )));
        }
    }
    Ok(days)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::GENERATE_PLAN, post(Self::handle_generate_plan))
            .with_state(resources)
    }

    /// Handle POST /generate-plan
    async fn handle_generate_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<PlanRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request_id = request_id_from_headers(&headers);
        let with_request_id = |error: AppError| match &request_id {
            Some(id) => error.with_request_id(id.clone()),
            None => error,
        };

        let Json(request) = payload.map_err(|rejection| {
            let code = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ErrorCode::PayloadTooLarge
            } else {
                ErrorCode::InvalidInput
            };
            with_request_id(AppError::new(
                code,
                format!("Invalid request body: {}", rejection.body_text()),
            ))
        })?;
        let profile = request.into_profile().map_err(with_request_id)?;

        debug!(
            age = profile.age,
            days = profile.available_days().len(),
            diet = %profile.diet,
            "Plan request validated"
        );

        let outcome = resources.plan_service.generate(&profile).await;
        let source = if outcome.is_fallback() { "fallback" } else { "ai" };
        info!(
            request_id = request_id.as_deref().unwrap_or_default(),
            plan.source = source,
            "Plan request completed"
        );

        let mut response = match outcome {
            PlanOutcome::Generated(plan) => (StatusCode::OK, Json(plan)).into_response(),
            PlanOutcome::Fallback { plan, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(plan)).into_response()
            }
        };
        response.headers_mut().insert(
            HeaderName::from_static(PLAN_SOURCE_HEADER),
            HeaderValue::from_static(source),
        );

        Ok(response)
    }
}
