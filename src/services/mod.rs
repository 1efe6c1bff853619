// ABOUTME: Business logic services
// ABOUTME: Currently the plan generation service with its remote and fallback paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Remote-first weekly plan generation with rule-based fallback
pub mod plan_generation;

pub use plan_generation::{
    extract_json_object, parse_generated_plan, DietaryRecommendations, FallbackPlanResponse,
    GeneratedPlan, MacroSplit, MealExamples, PlanGenerationError, PlanGenerationService,
    PlanOutcome,
};
