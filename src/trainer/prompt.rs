// ABOUTME: Prompt construction for workout generation requests
// ABOUTME: States the parameters and mandates the strict JSON output contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Prompt Builder
//!
//! Turns extracted parameters into a generation instruction. The output
//! format contract is load-bearing: [`crate::trainer::parser`] assumes the
//! reply contains exactly one JSON object with the keys `name`,
//! `description`, `warmup`, `main`, and `cooldown`.

use crate::models::WorkoutGenerationRequest;

/// Build the generation prompt for one request
///
/// States duration and difficulty, embeds the preferences verbatim, and
/// pins the reply to a single JSON object with numeric second fields so
/// the parser never has to interpret "X seconds" strings.
#[must_use]
pub fn build_workout_prompt(request: &WorkoutGenerationRequest) -> String {
    format!(
        r#"Generate a {duration}-minute {difficulty} fitness workout routine.
User preferences: {preferences}

Return ONLY valid JSON in this exact format, no other text:
{{
  "name": "Workout name",
  "description": "Brief description",
  "warmup": [
    {{
      "name": "Exercise name",
      "durationSeconds": 30,
      "instructions": "How to perform"
    }}
  ],
  "main": [
    {{
      "name": "Exercise name",
      "sets": 3,
      "reps": "12-15",
      "restSeconds": 60,
      "instructions": "How to perform"
    }}
  ],
  "cooldown": [
    {{
      "name": "Exercise name",
      "durationSeconds": 30,
      "instructions": "How to perform"
    }}
  ]
}}

Use only the keys shown above. "durationSeconds" and "restSeconds" must be
plain numbers of seconds. "reps" may be a number or a range like "12-15"."#,
        duration = request.duration_minutes,
        difficulty = request.difficulty,
        preferences = request.preferences,
    )
}
