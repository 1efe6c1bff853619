// ABOUTME: User fitness profile and the tags that steer plan generation
// ABOUTME: Activity level, experience level, diet preference, and the validated UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::{normalize_label, DayOfWeek};
use crate::constants::limits::DEFAULT_EXERCISES_PER_DAY;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Self-reported daily activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise one to three days a week
    LightlyActive,
    /// Moderate exercise three to five days a week
    ModeratelyActive,
    /// Hard exercise most days
    VeryActive,
}

impl ActivityLevel {
    /// Lenient parse of a form value; unknown values yield `None`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "sedentary" => Some(Self::Sedentary),
            "lightlyactive" | "light" => Some(Self::LightlyActive),
            "moderatelyactive" | "moderate" => Some(Self::ModeratelyActive),
            "veryactive" => Some(Self::VeryActive),
            _ => None,
        }
    }

    /// Wire value of the level
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly-active",
            Self::ModeratelyActive => "moderately-active",
            Self::VeryActive => "very-active",
        }
    }

    /// Whether the user should get the beginner-biased category rotation
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Sedentary | Self::LightlyActive)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training experience, which controls workload per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// New to structured training
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Years of consistent training
    Advanced,
}

impl ExperienceLevel {
    /// Lenient parse of a form value; unknown values yield `None`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "beginner" | "novice" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Number of exercises to schedule on each active day
    #[must_use]
    pub const fn exercises_per_day(self) -> usize {
        match self {
            Self::Beginner => 3,
            Self::Intermediate => 4,
            Self::Advanced => 5,
        }
    }

    /// Activity level assumed when the profile only states experience
    #[must_use]
    pub const fn implied_activity_level(self) -> ActivityLevel {
        match self {
            Self::Beginner => ActivityLevel::LightlyActive,
            Self::Intermediate => ActivityLevel::ModeratelyActive,
            Self::Advanced => ActivityLevel::VeryActive,
        }
    }
}

/// Dietary preference
///
/// Only `HighProtein` and `LowCarb` change the generated plan; any other value
/// is carried through verbatim for the AI prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DietPreference {
    /// Protein-focused diet; biases the rotation toward strength days
    HighProtein,
    /// Reduced carbohydrate diet; adds an extra cardio day to the rotation
    LowCarb,
    /// Anything else, kept as written
    Other(String),
    /// No preference given
    #[default]
    Unspecified,
}

impl DietPreference {
    /// Parse a form value; never fails
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match normalize_label(trimmed).as_str() {
            "" => Self::Unspecified,
            "highprotein" => Self::HighProtein,
            "lowcarb" => Self::LowCarb,
            _ => Self::Other(trimmed.to_owned()),
        }
    }

    /// Text used in prompts and responses
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::HighProtein => "high-protein",
            Self::LowCarb => "low-carb",
            Self::Other(value) => value,
            Self::Unspecified => "no preference",
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DietPreference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Validated fitness profile a weekly plan is generated for
///
/// Construction guarantees a positive age and at least one available day.
/// Available days are held as an ordered set, so they are unique and iterate
/// in week order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Gender as entered by the user
    pub gender: Option<String>,
    /// Dietary preference
    pub diet: DietPreference,
    /// Primary goal (e.g. "cutting", "bulking")
    pub goal: Option<String>,
    /// Stated activity level
    pub activity_level: Option<ActivityLevel>,
    /// Experience as entered by the user
    pub experience: Option<String>,
    /// Available equipment
    pub equipment: Vec<String>,
    /// Injuries, conditions, or other notes
    pub health_notes: Option<String>,
    available_days: BTreeSet<DayOfWeek>,
}

impl UserProfile {
    /// Create a profile with the required fields
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `age` is zero and `InvalidInput` when no
    /// day is available.
    pub fn new(age: u32, available_days: impl IntoIterator<Item = DayOfWeek>) -> AppResult<Self> {
        if age == 0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                "age must be a positive number",
            ));
        }

        let available_days: BTreeSet<DayOfWeek> = available_days.into_iter().collect();
        if available_days.is_empty() {
            return Err(AppError::invalid_input(
                "availableDays must contain at least one day",
            ));
        }

        Ok(Self {
            age,
            gender: None,
            diet: DietPreference::Unspecified,
            goal: None,
            activity_level: None,
            experience: None,
            equipment: Vec::new(),
            health_notes: None,
            available_days,
        })
    }

    /// Set the diet preference
    #[must_use]
    pub fn with_diet(mut self, diet: DietPreference) -> Self {
        self.diet = diet;
        self
    }

    /// Set the activity level
    #[must_use]
    pub fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    /// Set the free-text experience
    #[must_use]
    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = Some(experience.into());
        self
    }

    /// Set the gender
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the goal
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Set the available equipment
    #[must_use]
    pub fn with_equipment(mut self, equipment: Vec<String>) -> Self {
        self.equipment = equipment;
        self
    }

    /// Set health notes
    #[must_use]
    pub fn with_health_notes(mut self, notes: impl Into<String>) -> Self {
        self.health_notes = Some(notes.into());
        self
    }

    /// Days the user can train, in week order
    #[must_use]
    pub const fn available_days(&self) -> &BTreeSet<DayOfWeek> {
        &self.available_days
    }

    /// Whether the user can train on `day`
    #[must_use]
    pub fn is_available(&self, day: DayOfWeek) -> bool {
        self.available_days.contains(&day)
    }

    /// Parsed experience level, if the free text is recognized
    #[must_use]
    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.experience.as_deref().and_then(ExperienceLevel::parse)
    }

    /// Activity level used for planning
    ///
    /// The stated level wins; otherwise it is implied from the experience level.
    #[must_use]
    pub fn effective_activity_level(&self) -> Option<ActivityLevel> {
        self.activity_level.or_else(|| {
            self.experience_level()
                .map(ExperienceLevel::implied_activity_level)
        })
    }

    /// Exercises to schedule per active day
    #[must_use]
    pub fn exercises_per_day(&self) -> usize {
        self.experience_level()
            .map_or(DEFAULT_EXERCISES_PER_DAY, ExperienceLevel::exercises_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(
            ActivityLevel::parse("lightly-active"),
            Some(ActivityLevel::LightlyActive)
        );
        assert_eq!(
            ActivityLevel::parse("moderatelyActive"),
            Some(ActivityLevel::ModeratelyActive)
        );
        assert_eq!(
            ActivityLevel::parse("Very Active"),
            Some(ActivityLevel::VeryActive)
        );
        assert_eq!(ActivityLevel::parse("couch potato"), None);
    }

    #[test]
    fn test_diet_parsing() {
        assert_eq!(DietPreference::parse("high-protein"), DietPreference::HighProtein);
        assert_eq!(DietPreference::parse("lowCarb"), DietPreference::LowCarb);
        assert_eq!(
            DietPreference::parse("vegan"),
            DietPreference::Other("vegan".to_owned())
        );
        assert_eq!(DietPreference::parse("  "), DietPreference::Unspecified);
    }

    #[test]
    fn test_profile_rejects_zero_age_and_empty_days() {
        let err = UserProfile::new(0, [DayOfWeek::Monday]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let err = UserProfile::new(30, Vec::<DayOfWeek>::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_available_days_are_ordered_and_unique() {
        let profile = UserProfile::new(
            30,
            [DayOfWeek::Friday, DayOfWeek::Monday, DayOfWeek::Friday],
        )
        .unwrap();
        let days: Vec<_> = profile.available_days().iter().copied().collect();
        assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Friday]);
    }

    #[test]
    fn test_experience_drives_count_and_implied_activity() {
        let base = UserProfile::new(25, [DayOfWeek::Monday]).unwrap();
        assert_eq!(base.exercises_per_day(), 3);
        assert_eq!(base.effective_activity_level(), None);

        let advanced = base.clone().with_experience("advanced");
        assert_eq!(advanced.exercises_per_day(), 5);
        assert_eq!(
            advanced.effective_activity_level(),
            Some(ActivityLevel::VeryActive)
        );

        let stated = advanced.with_activity_level(ActivityLevel::Sedentary);
        assert_eq!(
            stated.effective_activity_level(),
            Some(ActivityLevel::Sedentary)
        );
    }
}
