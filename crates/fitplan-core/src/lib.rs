// ABOUTME: Core types and constants for the Fitplan weekly plan service
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitplan Core
//!
//! Foundation crate providing shared types and constants for the Fitplan
//! service. The planner crate and the HTTP server both build on these types,
//! so this crate stays free of I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Week days, workout categories, user profiles and plan shapes

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (days, categories, profiles, plans)
pub mod models;
