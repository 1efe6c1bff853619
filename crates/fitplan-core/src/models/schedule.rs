// ABOUTME: Fixed calendar and workout vocabularies for plan generation
// ABOUTME: Defines DayOfWeek (Sunday-first ordering) and WorkoutCategory with parsing and labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::normalize_label;
use crate::errors::AppError;

/// Day of the week
///
/// Variant order is the display order of a plan: the week starts on Sunday.
/// `Ord` follows that order, so a `BTreeMap<DayOfWeek, _>` iterates Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    /// Sunday
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl DayOfWeek {
    /// Every day in week order
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Capitalized English name, as used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::invalid_input(format!("Unknown day of week: '{s}'")))
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Workout focus grouping
///
/// Each category maps to a fixed set of exercises in the planner's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkoutCategory {
    /// Chest, back, shoulders and arms
    UpperBody,
    /// Legs and glutes
    LowerBody,
    /// Conditioning and heart rate work
    Cardio,
    /// Abdominals and trunk stability
    Core,
    /// Compound full-body movements
    FullBody,
}

impl WorkoutCategory {
    /// Every category
    pub const ALL: [Self; 5] = [
        Self::UpperBody,
        Self::LowerBody,
        Self::Cardio,
        Self::Core,
        Self::FullBody,
    ];

    /// Human readable label used as a day's focus
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpperBody => "Upper Body",
            Self::LowerBody => "Lower Body",
            Self::Cardio => "Cardio",
            Self::Core => "Core",
            Self::FullBody => "Full Body",
        }
    }
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkoutCategory {
    type Err = AppError;

    /// Accepts the label (`"Upper Body"`) as well as camelCase, snake and kebab forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|category| normalize_label(category.label()) == wanted)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown workout category: '{s}'")))
    }
}

impl Serialize for WorkoutCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for WorkoutCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
