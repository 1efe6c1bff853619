// ABOUTME: Weekly plan shapes shared by AI-generated and fallback plans
// ABOUTME: ExerciseEntry, DayPlan, and the seven-day WeeklyPlan keyed by DayOfWeek
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use super::DayOfWeek;
use crate::constants::fallback_text::{
    NOT_APPLICABLE, REST_DAY_ACTIVITY, REST_DAY_DETAILS, REST_DAY_FOCUS,
};
use crate::constants::limits::DAYS_PER_WEEK;

/// One exercise within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    /// Exercise name
    pub name: String,
    /// Sets, reps, or duration
    pub details: String,
    /// Simpler or different-equipment substitute
    #[serde(default)]
    pub alternative: String,
}

impl ExerciseEntry {
    /// Create an entry with no alternative
    #[must_use]
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            alternative: NOT_APPLICABLE.to_owned(),
        }
    }
}

/// Plan for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// Main goal of the day, or "Rest Day"
    pub focus: String,
    /// Warm-up routine
    #[serde(default)]
    pub warm_up: String,
    /// Exercises in order
    pub exercises: Vec<ExerciseEntry>,
    /// Cool-down routine
    #[serde(default)]
    pub cool_down: String,
}

impl DayPlan {
    /// The fixed recovery day
    ///
    /// Identical for every profile.
    #[must_use]
    pub fn rest_day() -> Self {
        Self {
            focus: REST_DAY_FOCUS.to_owned(),
            warm_up: NOT_APPLICABLE.to_owned(),
            exercises: vec![ExerciseEntry::new(REST_DAY_ACTIVITY, REST_DAY_DETAILS)],
            cool_down: NOT_APPLICABLE.to_owned(),
        }
    }

    /// Whether this is a rest day
    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.focus == REST_DAY_FOCUS
    }
}

/// Plan for a full week, keyed by day
///
/// Serializes as a JSON object whose keys are day names in week order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPlan(BTreeMap<DayOfWeek, DayPlan>);

impl WeeklyPlan {
    /// Create an empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the plan for `day`, returning the previous one
    pub fn insert(&mut self, day: DayOfWeek, plan: DayPlan) -> Option<DayPlan> {
        self.0.insert(day, plan)
    }

    /// Plan for `day`
    #[must_use]
    pub fn get(&self, day: DayOfWeek) -> Option<&DayPlan> {
        self.0.get(&day)
    }

    /// Number of days present
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no day is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every day of the week has a plan
    #[must_use]
    pub fn is_complete(&self) -> bool {
        // Keys are distinct days, so a full count means every day is present
        self.0.len() == DAYS_PER_WEEK
    }

    /// Days in week order
    pub fn iter(&self) -> btree_map::Iter<'_, DayOfWeek, DayPlan> {
        self.0.iter()
    }

    /// Days that have exercises scheduled
    pub fn active_days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0
            .iter()
            .filter(|(_, plan)| !plan.is_rest_day())
            .map(|(day, _)| *day)
    }

    /// Days marked as rest
    pub fn rest_days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0
            .iter()
            .filter(|(_, plan)| plan.is_rest_day())
            .map(|(day, _)| *day)
    }
}

impl<'a> IntoIterator for &'a WeeklyPlan {
    type Item = (&'a DayOfWeek, &'a DayPlan);
    type IntoIter = btree_map::Iter<'a, DayOfWeek, DayPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
