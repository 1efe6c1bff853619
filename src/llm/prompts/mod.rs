// ABOUTME: Plan generation prompts loaded at compile time
// ABOUTME: Renders the user profile into the plan template and provides the trainer persona
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! The plan template uses `{{placeholder}}` markers that [`render_plan_prompt`]
//! fills from a [`UserProfile`].

use crate::models::{ActivityLevel, UserProfile};

/// Trainer and nutritionist persona sent as the system message
pub const PLAN_SYSTEM_PROMPT: &str = include_str!("plan_system.md");

/// Weekly plan request template
pub const PLAN_GENERATION_TEMPLATE: &str = include_str!("plan_generation.md");

/// Rendered for empty lists and absent notes
const NONE_TEXT: &str = "None";

/// Rendered for optional profile fields the user skipped
const NOT_SPECIFIED: &str = "Not specified";

/// Get the system prompt for plan generation
#[must_use]
pub const fn plan_system_prompt() -> &'static str {
    PLAN_SYSTEM_PROMPT
}

/// Render the plan template for `profile`
///
/// Every profile field is embedded. Available days are listed in week order.
#[must_use]
pub fn render_plan_prompt(profile: &UserProfile) -> String {
    let available_days = profile
        .available_days()
        .iter()
        .map(|day| day.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let equipment = if profile.equipment.is_empty() {
        NONE_TEXT.to_owned()
    } else {
        profile.equipment.join(", ")
    };

    let activity_level = profile
        .activity_level
        .map_or(NOT_SPECIFIED, ActivityLevel::as_str);

    let health_notes = profile
        .health_notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .unwrap_or(NONE_TEXT);

    PLAN_GENERATION_TEMPLATE
        .replace("{{age}}", &profile.age.to_string())
        .replace("{{gender}}", profile.gender.as_deref().unwrap_or(NOT_SPECIFIED))
        .replace("{{goal}}", profile.goal.as_deref().unwrap_or(NOT_SPECIFIED))
        .replace(
            "{{experience}}",
            profile.experience.as_deref().unwrap_or(NOT_SPECIFIED),
        )
        .replace("{{activity_level}}", activity_level)
        .replace("{{diet}}", profile.diet.as_str())
        .replace("{{available_days}}", &available_days)
        .replace("{{equipment}}", &equipment)
        .replace("{{health_notes}}", health_notes)
}
