// ABOUTME: Integration tests for the plan generation service state machine
// ABOUTME: Exercises remote success, every fallback trigger, and fallback plan contents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use fitplan_server::errors::{AppError, ErrorCode};
use fitplan_server::models::{ActivityLevel, DayOfWeek, DietPreference, UserProfile};
use fitplan_server::services::{PlanGenerationError, PlanGenerationService, PlanOutcome};
use fitplan_planner::FallbackPlanBuilder;
use helpers::fenced_plan_reply;
use helpers::mock_provider::ScriptedProvider;

fn profile() -> UserProfile {
    UserProfile::new(40, [DayOfWeek::Tuesday, DayOfWeek::Saturday])
        .unwrap()
        .with_activity_level(ActivityLevel::ModeratelyActive)
        .with_diet(DietPreference::LowCarb)
        .with_goal("endurance")
}

#[tokio::test]
async fn test_remote_success_yields_generated_plan() {
    let provider = ScriptedProvider::replying(fenced_plan_reply());
    let service = PlanGenerationService::new(Some(provider.clone()));

    let outcome = service.generate(&profile()).await;

    assert!(!outcome.is_fallback());
    let PlanOutcome::Generated(plan) = outcome else {
        panic!("expected generated plan");
    };
    assert!(plan.dietary_recommendations.is_some());
    assert!(plan.weekly_plan.get(DayOfWeek::Monday).is_some());

    let request = &provider.requests()[0];
    assert_eq!(request.messages.len(), 2);
    assert!(request.messages[0].content.contains("personal trainer"));
    assert!(request.messages[1].content.contains("- Primary Goal: endurance"));
}

#[tokio::test]
async fn test_each_failure_kind_falls_back() {
    let cases = [
        (ScriptedProvider::failing(ErrorCode::ExternalRateLimited), "remote_error"),
        (ScriptedProvider::replying("no braces at all"), "no_json_object"),
        (ScriptedProvider::replying("{\"introduction\": 5}"), "invalid_payload"),
        (
            ScriptedProvider::replying("{\"introduction\": \"x\", \"weeklyPlan\": {}}"),
            "empty_weekly_plan",
        ),
    ];

    for (provider, expected_kind) in cases {
        let service = PlanGenerationService::new(Some(provider));
        match service.generate(&profile()).await {
            PlanOutcome::Fallback { plan, reason } => {
                assert_eq!(reason.kind(), expected_kind);
                assert!(plan.weekly_plan.is_complete());
            }
            PlanOutcome::Generated(_) => panic!("expected fallback for {expected_kind}"),
        }
    }
}

#[tokio::test]
async fn test_remote_error_keeps_provider_code() {
    let service =
        PlanGenerationService::new(Some(ScriptedProvider::failing(ErrorCode::ExternalAuthFailed)));

    let PlanOutcome::Fallback { reason, .. } = service.generate(&profile()).await else {
        panic!("expected fallback");
    };
    assert!(matches!(reason, PlanGenerationError::Remote(_)));
    let error: AppError = reason.into();
    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_no_provider_falls_back_without_remote_call() {
    let service = PlanGenerationService::new(None);
    assert_eq!(service.provider_name(), None);

    let outcome = service.generate(&profile()).await;
    let PlanOutcome::Fallback { plan, reason } = outcome else {
        panic!("expected fallback");
    };
    assert!(matches!(reason, PlanGenerationError::NoProvider));

    // Moderately active, low carb: Upper Body then Lower Body
    let tuesday = plan.weekly_plan.get(DayOfWeek::Tuesday).unwrap();
    let saturday = plan.weekly_plan.get(DayOfWeek::Saturday).unwrap();
    assert_eq!(tuesday.focus, "Upper Body");
    assert_eq!(saturday.focus, "Lower Body");
    assert_eq!(tuesday.exercises[0].details, "3 sets of 12-15 reps");
    assert_eq!(plan.weekly_plan.rest_days().count(), 5);
}

#[tokio::test]
async fn test_custom_builder_is_used_for_fallback() {
    let service = PlanGenerationService::new(None)
        .with_fallback_builder(FallbackPlanBuilder::new().with_exercises_per_day(1));

    let plan = service.fallback(&profile());
    for day in plan.weekly_plan.active_days() {
        assert_eq!(plan.weekly_plan.get(day).unwrap().exercises.len(), 1);
    }
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let service = PlanGenerationService::new(Some(ScriptedProvider::replying(fenced_plan_reply())));

    let profile = profile();

    let (first, second) = tokio::join!(service.generate(&profile), service.generate(&profile));
    assert!(!first.is_fallback());
    assert!(!second.is_fallback());
    assert_eq!(first.weekly_plan(), second.weekly_plan());
}
