// ABOUTME: Domain models for weekly workout planning
// ABOUTME: Re-exports calendar, profile, and plan types used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - **schedule**: `DayOfWeek` and `WorkoutCategory`, the two fixed vocabularies
//! - **profile**: the user attributes a plan is generated from
//! - **plan**: `ExerciseEntry`, `DayPlan` and the seven-day `WeeklyPlan`

mod plan;
mod profile;
mod schedule;

pub use plan::{DayPlan, ExerciseEntry, WeeklyPlan};
pub use profile::{ActivityLevel, DietPreference, ExperienceLevel, UserProfile};
pub use schedule::{DayOfWeek, WorkoutCategory};

/// Normalize a free-form label for lenient matching
///
/// Lowercases and drops separators so that `"lightly-active"`, `"lightly_active"`,
/// `"Lightly Active"` and `"lightlyActive"` all compare equal.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
