// ABOUTME: Static exercise catalog keyed by workout category
// ABOUTME: Lookup by category or label, plus random sampling without replacement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitplan_core::models::WorkoutCategory;
use rand::seq::SliceRandom;
use rand::Rng;

const UPPER_BODY: &[&str] = &[
    "Push-ups",
    "Pull-ups",
    "Dumbbell Rows",
    "Overhead Press",
    "Bicep Curls",
    "Tricep Dips",
];

const LOWER_BODY: &[&str] = &[
    "Squats",
    "Lunges",
    "Deadlifts",
    "Glute Bridges",
    "Calf Raises",
    "Leg Press",
];

const CARDIO: &[&str] = &[
    "Running",
    "Cycling",
    "Jumping Jacks",
    "Burpees",
    "High Knees",
    "Swimming",
];

const CORE: &[&str] = &[
    "Plank",
    "Crunches",
    "Leg Raises",
    "Russian Twists",
    "Bicycle Crunches",
];

const FULL_BODY: &[&str] = &[
    "Kettlebell Swings",
    "Thrusters",
    "Clean and Jerk",
    "Mountain Climbers",
];

/// Exercises belonging to `category`, in catalog order
#[must_use]
pub const fn exercises_for(category: WorkoutCategory) -> &'static [&'static str] {
    match category {
        WorkoutCategory::UpperBody => UPPER_BODY,
        WorkoutCategory::LowerBody => LOWER_BODY,
        WorkoutCategory::Cardio => CARDIO,
        WorkoutCategory::Core => CORE,
        WorkoutCategory::FullBody => FULL_BODY,
    }
}

/// Exercises for a category given by label
///
/// Unknown labels yield an empty slice: callers treat that as "no exercises
/// available", not as an error.
#[must_use]
pub fn exercises_for_label(label: &str) -> &'static [&'static str] {
    match label.parse::<WorkoutCategory>() {
        Ok(category) => exercises_for(category),
        Err(_) => &[],
    }
}

/// Sample up to `count` distinct exercises from `category`
///
/// When the category holds fewer than `count` exercises, all of them are
/// returned. The result never contains duplicates.
pub fn select_exercises<R: Rng + ?Sized>(
    category: WorkoutCategory,
    count: usize,
    rng: &mut R,
) -> Vec<&'static str> {
    exercises_for(category)
        .choose_multiple(rng, count)
        .copied()
        .collect()
}
