// ABOUTME: Metadata derivation for validated workout plans
// ABOUTME: Computes calorie estimates, muscle-group tags, and free-form tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Metadata Deriver
//!
//! Deterministic enrichment of a validated plan. No randomness, no clock
//! dependence: the same plan and request always produce the same metadata.

use std::collections::BTreeSet;

use crate::models::{Difficulty, WorkoutGenerationRequest, WorkoutMetadata, WorkoutPlan};

/// Muscle-group keyword table: any keyword hit adds the group
const MUSCLE_GROUP_KEYWORDS: &[(&str, &[&str])] = &[
    ("legs", &["squat", "lunge"]),
    ("chest", &["push", "press"]),
    ("core", &["plank", "crunch"]),
    ("arms", &["curl", "row"]),
];

/// Estimate calorie burn for a workout
///
/// `durationMinutes * ratePerMinute(difficulty)` with fixed per-level
/// rates. Monotonic non-decreasing in duration and in difficulty.
#[must_use]
pub fn estimate_calories(duration_minutes: u32, difficulty: Difficulty) -> u32 {
    duration_minutes.saturating_mul(difficulty.calorie_rate_per_minute())
}

/// Scan the serialized plan for muscle-group keywords
///
/// Case-insensitive substring scan over the whole plan text, so keywords
/// in names and instructions both count. Returns a deduplicated set;
/// no keyword hits yield an empty set, never an error.
#[must_use]
pub fn target_muscle_groups(plan: &WorkoutPlan) -> BTreeSet<String> {
    let text = serde_json::to_string(plan)
        .unwrap_or_default()
        .to_lowercase();

    MUSCLE_GROUP_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(group, _)| (*group).to_owned())
        .collect()
}

/// Build the tag list: difficulty first, then each preference token
#[must_use]
pub fn build_tags(difficulty: Difficulty, preferences: &str) -> Vec<String> {
    let mut tags = vec![difficulty.as_str().to_owned()];
    tags.extend(
        preferences
            .split(", ")
            .filter(|token| !token.is_empty())
            .map(ToOwned::to_owned),
    );
    tags
}

/// Derive all metadata for a validated plan
#[must_use]
pub fn derive_metadata(plan: &WorkoutPlan, request: &WorkoutGenerationRequest) -> WorkoutMetadata {
    WorkoutMetadata {
        estimated_calories: estimate_calories(request.duration_minutes, request.difficulty),
        target_muscle_groups: target_muscle_groups(plan),
        tags: build_tags(request.difficulty, &request.preferences),
        exercise_count: plan.exercise_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reps, Segment};

    fn plan_with_main(segments: Vec<Segment>) -> WorkoutPlan {
        WorkoutPlan {
            name: "Test".to_owned(),
            description: "Test plan".to_owned(),
            warmup: vec![],
            main: segments,
            cooldown: vec![],
        }
    }

    fn loaded(name: &str) -> Segment {
        Segment::Loaded {
            name: name.to_owned(),
            sets: 3,
            reps: Reps::Count(10),
            rest_seconds: 60,
            instructions: "Controlled tempo".to_owned(),
        }
    }

    fn request(duration: u32, difficulty: Difficulty, preferences: &str) -> WorkoutGenerationRequest {
        WorkoutGenerationRequest {
            user_id: "u1".to_owned(),
            duration_minutes: duration,
            difficulty,
            preferences: preferences.to_owned(),
        }
    }

    #[test]
    fn test_calorie_rates() {
        assert_eq!(estimate_calories(30, Difficulty::Beginner), 150);
        assert_eq!(estimate_calories(30, Difficulty::Intermediate), 240);
        assert_eq!(estimate_calories(30, Difficulty::Advanced), 330);
    }

    #[test]
    fn test_calories_monotonic_in_duration() {
        for difficulty in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced] {
            let mut last = 0;
            for duration in [5, 10, 20, 45, 90] {
                let calories = estimate_calories(duration, difficulty);
                assert!(calories >= last);
                last = calories;
            }
        }
    }

    #[test]
    fn test_calories_monotonic_in_difficulty() {
        for duration in [10, 30, 60] {
            assert!(
                estimate_calories(duration, Difficulty::Beginner)
                    <= estimate_calories(duration, Difficulty::Intermediate)
            );
            assert!(
                estimate_calories(duration, Difficulty::Intermediate)
                    <= estimate_calories(duration, Difficulty::Advanced)
            );
        }
    }

    #[test]
    fn test_muscle_groups_from_names_and_instructions() {
        let plan = plan_with_main(vec![
            loaded("Goblet Squat"),
            loaded("Bent-over Row"),
            Segment::Timed {
                name: "Hold".to_owned(),
                duration_seconds: 45,
                instructions: "Stay in a plank position".to_owned(),
            },
        ]);

        let groups = target_muscle_groups(&plan);
        assert!(groups.contains("legs"));
        assert!(groups.contains("arms"));
        assert!(groups.contains("core"));
        assert!(!groups.contains("chest"));
    }

    #[test]
    fn test_muscle_groups_empty_without_keywords() {
        let plan = plan_with_main(vec![loaded("Mystery movement")]);
        assert!(target_muscle_groups(&plan).is_empty());
    }

    #[test]
    fn test_tags_difficulty_then_preferences() {
        assert_eq!(
            build_tags(Difficulty::Advanced, "cardio, hiit"),
            vec!["advanced", "cardio", "hiit"]
        );
        assert_eq!(build_tags(Difficulty::Beginner, ""), vec!["beginner"]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let plan = plan_with_main(vec![loaded("Push-up"), loaded("Squat")]);
        let req = request(20, Difficulty::Intermediate, "hiit");

        let first = derive_metadata(&plan, &req);
        let second = derive_metadata(&plan, &req);
        assert_eq!(first, second);
        assert_eq!(first.exercise_count, 2);
        assert_eq!(first.estimated_calories, 160);
    }
}
