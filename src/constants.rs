// ABOUTME: Application constants re-exported from fitplan-core
// ABOUTME: Service names, routes, environment variable names, limits, and fallback texts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitplan_core::constants::*;
