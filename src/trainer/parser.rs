// ABOUTME: Response parsing and validation for model-generated workout plans
// ABOUTME: Extracts the greedy JSON span from free text and decodes it into a WorkoutPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Response Parser & Validator
//!
//! Models often wrap the requested JSON in prose or markdown fences. The
//! parser takes the span from the first `{` through the last `}` (greedy)
//! and decodes it. Two distinct failures:
//!
//! - [`MalformedResponse`](crate::errors::ErrorCode::MalformedResponse):
//!   no such span exists, or the span is not valid JSON
//! - [`InvalidShape`](crate::errors::ErrorCode::InvalidShape): valid JSON
//!   that is not a workout plan (missing keys, mistyped elements)
//!
//! The greedy span is authoritative: a reply containing several JSON
//! objects is judged by the outermost first-to-last span, never by some
//! narrower candidate. This component never panics; all failure paths
//! return a typed error.

use crate::errors::{AppError, AppResult};
use crate::models::WorkoutPlan;

/// Locate the greedy JSON object span in free text
#[must_use]
pub fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a raw model reply into a validated workout plan
///
/// # Errors
///
/// Returns `MalformedResponse` when no JSON object can be located and
/// `InvalidShape` when JSON parses but does not match the expected shape.
pub fn parse_workout_plan(raw: &str) -> AppResult<WorkoutPlan> {
    let span = json_object_span(raw)
        .ok_or_else(|| AppError::malformed_response("model reply contains no JSON object"))?;

    let value: serde_json::Value = serde_json::from_str(span).map_err(|e| {
        AppError::malformed_response(format!("JSON span failed to parse: {e}")).with_source(e)
    })?;

    serde_json::from_value(value).map_err(|e| {
        AppError::invalid_shape(format!("reply is not a workout plan: {e}")).with_source(e)
    })
}
