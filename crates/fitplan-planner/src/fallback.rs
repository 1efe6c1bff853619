// ABOUTME: Rule-based weekly plan builder used when AI generation fails
// ABOUTME: Rotates categories over active days, samples exercises, and fills rest days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback Plan Builder
//!
//! Builds a complete [`WeeklyPlan`] from a [`UserProfile`] without any external
//! service. The algorithm:
//!
//! 1. Walk the week Sunday-first. Available days are active, the rest are rest days.
//! 2. The `i`-th active day gets `sequence.cyclic(i)` from the category rotation.
//!    The counter advances per active day, not per calendar day.
//! 3. Each active day gets a random sample of distinct exercises from its category,
//!    annotated with a sets/reps string chosen by activity level.
//! 4. Every rest day gets the same fixed recovery entry.
//!
//! Exercise sampling is random on purpose so repeated requests vary. Use
//! [`FallbackPlanBuilder::build_with_rng`] with a seeded generator for
//! reproducible output.

use fitplan_core::constants::fallback_text::{ACTIVE_COOL_DOWN, ACTIVE_WARM_UP};
use fitplan_core::models::{
    ActivityLevel, DayOfWeek, DayPlan, ExerciseEntry, UserProfile, WeeklyPlan,
};
use rand::Rng;
use tracing::debug;

use crate::catalog::select_exercises;
use crate::sequencer::build_sequence;

/// Annotation used when the activity level is missing or unknown
const DEFAULT_SETS_AND_REPS: &str = "3 sets of 10-12 reps";

/// Sets/reps annotation for an activity level
#[must_use]
pub const fn sets_and_reps(level: Option<ActivityLevel>) -> &'static str {
    match level {
        Some(ActivityLevel::Sedentary) => "2 sets of 10-12 reps",
        Some(ActivityLevel::LightlyActive) => "3 sets of 10-12 reps",
        Some(ActivityLevel::ModeratelyActive) => "3 sets of 12-15 reps",
        Some(ActivityLevel::VeryActive) => "4 sets of 12-15 reps",
        None => DEFAULT_SETS_AND_REPS,
    }
}

/// Builds rule-based weekly plans
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPlanBuilder {
    exercises_per_day: Option<usize>,
}

impl FallbackPlanBuilder {
    /// Builder that sizes each day from the profile's experience level
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exercises_per_day: None,
        }
    }

    /// Override the number of exercises per active day
    #[must_use]
    pub const fn with_exercises_per_day(mut self, count: usize) -> Self {
        self.exercises_per_day = Some(count);
        self
    }

    /// Build a plan using the thread-local random generator
    #[must_use]
    pub fn build(&self, profile: &UserProfile) -> WeeklyPlan {
        self.build_with_rng(profile, &mut rand::thread_rng())
    }

    /// Build a plan drawing exercise samples from `rng`
    ///
    /// The returned plan always contains all seven days exactly once.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        profile: &UserProfile,
        rng: &mut R,
    ) -> WeeklyPlan {
        let activity_level = profile.effective_activity_level();
        let sequence = build_sequence(activity_level, &profile.diet);
        let count = self
            .exercises_per_day
            .unwrap_or_else(|| profile.exercises_per_day());
        let details = sets_and_reps(activity_level);

        debug!(
            activity_level = ?activity_level,
            diet = %profile.diet,
            rotation_len = sequence.len(),
            exercises_per_day = count,
            "Building fallback plan"
        );

        let mut plan = WeeklyPlan::new();
        let mut active_index = 0;

        for day in DayOfWeek::ALL {
            let day_plan = if profile.is_available(day) {
                let category = sequence.cyclic(active_index);
                active_index += 1;

                DayPlan {
                    focus: category.label().to_owned(),
                    warm_up: ACTIVE_WARM_UP.to_owned(),
                    exercises: select_exercises(category, count, rng)
                        .into_iter()
                        .map(|name| ExerciseEntry::new(name, details))
                        .collect(),
                    cool_down: ACTIVE_COOL_DOWN.to_owned(),
                }
            } else {
                DayPlan::rest_day()
            };
            plan.insert(day, day_plan);
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use fitplan_core::models::{DietPreference, WorkoutCategory};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_sets_and_reps_table() {
        assert_eq!(
            sets_and_reps(Some(ActivityLevel::Sedentary)),
            "2 sets of 10-12 reps"
        );
        assert_eq!(
            sets_and_reps(Some(ActivityLevel::VeryActive)),
            "4 sets of 12-15 reps"
        );
        assert_eq!(sets_and_reps(None), DEFAULT_SETS_AND_REPS);
    }

    #[test]
    fn test_counter_advances_per_active_day_only() {
        let profile = UserProfile::new(40, [DayOfWeek::Tuesday, DayOfWeek::Saturday])
            .unwrap()
            .with_activity_level(ActivityLevel::ModeratelyActive)
            .with_diet(DietPreference::Unspecified);
        let plan = FallbackPlanBuilder::new()
            .build_with_rng(&profile, &mut ChaCha8Rng::seed_from_u64(1));

        // Split rotation starts Upper Body, Lower Body regardless of the calendar gap
        assert_eq!(
            plan.get(DayOfWeek::Tuesday).unwrap().focus,
            WorkoutCategory::UpperBody.label()
        );
        assert_eq!(
            plan.get(DayOfWeek::Saturday).unwrap().focus,
            WorkoutCategory::LowerBody.label()
        );
    }

    #[test]
    fn test_count_override() {
        let profile = UserProfile::new(30, [DayOfWeek::Monday])
            .unwrap()
            .with_experience("advanced");
        let plan = FallbackPlanBuilder::new()
            .with_exercises_per_day(2)
            .build_with_rng(&profile, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(plan.get(DayOfWeek::Monday).unwrap().exercises.len(), 2);
    }

    #[test]
    fn test_active_day_texts() {
        let profile = UserProfile::new(30, [DayOfWeek::Monday]).unwrap();
        let plan = FallbackPlanBuilder::new().build(&profile);
        let monday = plan.get(DayOfWeek::Monday).unwrap();
        assert_eq!(monday.warm_up, ACTIVE_WARM_UP);
        assert_eq!(monday.cool_down, ACTIVE_COOL_DOWN);
        assert!(monday
            .exercises
            .iter()
            .all(|entry| entry.details == DEFAULT_SETS_AND_REPS && entry.alternative == "N/A"));
    }
}
