// ABOUTME: Domain models re-exported from fitplan-core
// ABOUTME: DayOfWeek, WorkoutCategory, UserProfile, and the weekly plan shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitplan_core::models::*;
