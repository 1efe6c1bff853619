// ABOUTME: Criterion benchmarks for fallback plan assembly and AI reply parsing
// ABOUTME: Measures plan building across schedule sizes and JSON extraction from fenced replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the plan pipeline.
//!
//! Covers the rule-based builder for one to seven active days and the parsing
//! of model replies, both bare and wrapped in markdown fences.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitplan_planner::{build_sequence, FallbackPlanBuilder};
use fitplan_server::models::{ActivityLevel, DayOfWeek, DietPreference, UserProfile};
use fitplan_server::services::{parse_generated_plan, FallbackPlanResponse};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn profile_with_days(count: usize) -> UserProfile {
    UserProfile::new(34, DayOfWeek::ALL.into_iter().take(count))
        .unwrap()
        .with_activity_level(ActivityLevel::ModeratelyActive)
        .with_diet(DietPreference::HighProtein)
}

/// A reply shaped like a model answer: prose, a fence, then the plan
fn fenced_reply(days: usize) -> String {
    let plan = FallbackPlanBuilder::new()
        .build_with_rng(&profile_with_days(days), &mut ChaCha8Rng::seed_from_u64(5));
    let body = serde_json::to_string_pretty(&FallbackPlanResponse::new(plan)).unwrap();
    format!("Here is your plan!\n```json\n{body}\n```\nStay consistent.")
}

fn bench_fallback_build(c: &mut Criterion) {
    let builder = FallbackPlanBuilder::new();
    let mut group = c.benchmark_group("fallback_build");

    for days in [1_usize, 3, 5, 7] {
        let profile = profile_with_days(days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("active_days", days), &profile, |b, profile| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            b.iter(|| builder.build_with_rng(black_box(profile), &mut rng));
        });
    }

    group.bench_function("thread_rng", |b| {
        let profile = profile_with_days(7);
        b.iter(|| builder.build(black_box(&profile)));
    });

    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_sequence");

    for diet in [
        DietPreference::Unspecified,
        DietPreference::HighProtein,
        DietPreference::LowCarb,
    ] {
        group.bench_with_input(BenchmarkId::new("diet", diet.as_str()), &diet, |b, diet| {
            b.iter(|| build_sequence(black_box(Some(ActivityLevel::Sedentary)), diet));
        });
    }

    group.finish();
}

fn bench_reply_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply_parsing");

    for days in [1_usize, 7] {
        let reply = fenced_reply(days);
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("fenced", days), &reply, |b, reply| {
            b.iter(|| parse_generated_plan(black_box(reply)).unwrap());
        });
    }

    group.bench_function("no_json", |b| {
        let reply = "Sorry, I can't help with that request right now.";
        b.iter(|| parse_generated_plan(black_box(reply)).is_err());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fallback_build,
    bench_sequence,
    bench_reply_parsing
);
criterion_main!(benches);
