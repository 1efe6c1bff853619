// ABOUTME: Unified error types re-exported from fitplan-core
// ABOUTME: AppError, ErrorCode, and the JSON error response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitplan_core::errors::*;
