// ABOUTME: Rule-based weekly plan generation used when the AI service is unavailable
// ABOUTME: Exposes the exercise catalog, category sequencer, and fallback plan builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitplan Planner
//!
//! The last line of defense behind the AI plan generator. Given a validated
//! [`UserProfile`](fitplan_core::models::UserProfile) it always produces a full
//! seven-day [`WeeklyPlan`](fitplan_core::models::WeeklyPlan):
//!
//! - **catalog**: fixed category to exercise tables
//! - **sequencer**: the category rotation for a given activity level and diet
//! - **fallback**: assigns categories to active days, samples exercises, fills rest days
//!
//! Nothing in this crate performs I/O and nothing in it can fail for a valid profile.

/// Static category to exercise tables
pub mod catalog;

/// Category rotation built from activity level and diet
pub mod sequencer;

/// Weekly plan assembly
pub mod fallback;

pub use catalog::{exercises_for, exercises_for_label, select_exercises};
pub use fallback::{sets_and_reps, FallbackPlanBuilder};
pub use sequencer::{build_sequence, CategorySequence};
