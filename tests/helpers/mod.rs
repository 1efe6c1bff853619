// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the Axum request helper, a scripted LLM provider, and plan fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;
pub mod mock_provider;

use std::sync::Arc;

use axum::Router;
use fitplan_server::config::environment::ServerConfig;
use fitplan_server::llm::LlmProvider;
use fitplan_server::resources::ServerResources;
use fitplan_server::server::build_router;
use serde_json::{json, Value};

/// Full application router around `provider`
pub fn test_app(provider: Option<Arc<dyn LlmProvider>>) -> Router {
    let resources = ServerResources::new(ServerConfig::default(), provider);
    build_router(Arc::new(resources))
}

/// A valid profile form body
pub fn profile_body(days: &[&str]) -> Value {
    json!({
        "age": "31",
        "gender": "female",
        "dietPreference": "high-protein",
        "goal": "cutting",
        "experience": "intermediate",
        "availableDays": days,
        "equipment": ["dumbbells", "bench"],
        "healthNotes": "none"
    })
}

/// A plausible model reply, wrapped in a markdown fence with commentary
pub fn fenced_plan_reply() -> String {
    let plan = json!({
        "introduction": "Great goal! Let's get you lean.",
        "dietaryRecommendations": {
            "summary": "Moderate deficit with high protein.",
            "calorieTarget": "1900-2100 kcal",
            "macroSplit": {"protein": "40%", "carbs": "35%", "fat": "25%"},
            "mealExamples": {
                "breakfast": "Greek yogurt with berries",
                "lunch": "Chicken salad",
                "dinner": "Salmon with greens"
            }
        },
        "weeklyPlan": {
            "Monday": {
                "focus": "Hypertrophy: Upper Body",
                "warmUp": "Band pull-aparts",
                "exercises": [
                    {
                        "name": "Dumbbell Bench Press",
                        "details": "4 sets of 8-10",
                        "alternative": "Push-ups"
                    }
                ],
                "coolDown": "Chest stretch"
            },
            "Tuesday": {
                "focus": "Rest Day",
                "warmUp": "N/A",
                "exercises": [{
                    "name": "Light walk or stretching",
                    "details": "20 minutes",
                    "alternative": "N/A"
                }],
                "coolDown": "N/A"
            }
        }
    });
    format!("Here is your plan:\n```json\n{plan:#}\n```\nGood luck!")
}
