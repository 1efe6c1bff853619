// ABOUTME: Workout category rotation derived from activity level and diet preference
// ABOUTME: Produces a non-empty sequence that is consumed cyclically across active days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitplan_core::models::{ActivityLevel, DietPreference, WorkoutCategory};

use WorkoutCategory::{Cardio, Core, FullBody, LowerBody, UpperBody};

/// Rotation for sedentary and lightly active users: full-body and cardio first
const BEGINNER_ROTATION: [WorkoutCategory; 6] =
    [FullBody, Cardio, Core, LowerBody, UpperBody, Cardio];

/// Rotation for everyone else: a specialized upper/lower split
const SPLIT_ROTATION: [WorkoutCategory; 7] = [
    UpperBody, LowerBody, Cardio, Core, UpperBody, LowerBody, Cardio,
];

/// Strength days placed in front of the rotation for high-protein diets
const HIGH_PROTEIN_PREFIX: [WorkoutCategory; 2] = [UpperBody, LowerBody];

/// Ordered, never-empty rotation of workout categories
///
/// Indexing wraps around, so a short rotation covers any number of active days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySequence {
    categories: Vec<WorkoutCategory>,
}

impl CategorySequence {
    /// Number of entries before the rotation repeats
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category for the `index`-th active day, wrapping at the end
    #[must_use]
    pub fn cyclic(&self, index: usize) -> WorkoutCategory {
        self.categories[index % self.categories.len()]
    }

    /// Entries in rotation order
    #[must_use]
    pub fn as_slice(&self) -> &[WorkoutCategory] {
        &self.categories
    }
}

/// Build the category rotation for a profile
///
/// Sedentary and lightly active users get the beginner rotation; any other or
/// unknown level gets the split rotation. A high-protein diet prepends two
/// strength days and a low-carb diet appends a cardio day.
#[must_use]
pub fn build_sequence(
    activity_level: Option<ActivityLevel>,
    diet: &DietPreference,
) -> CategorySequence {
    let base: &[WorkoutCategory] = if activity_level.is_some_and(ActivityLevel::is_low) {
        &BEGINNER_ROTATION
    } else {
        &SPLIT_ROTATION
    };

    let categories = match diet {
        DietPreference::HighProtein => [&HIGH_PROTEIN_PREFIX[..], base].concat(),
        DietPreference::LowCarb => [base, &[Cardio][..]].concat(),
        DietPreference::Other(_) | DietPreference::Unspecified => base.to_vec(),
    };

    CategorySequence { categories }
}
