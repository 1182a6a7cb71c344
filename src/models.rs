// ABOUTME: Core domain models for workout plans, enrichment metadata, and persisted records
// ABOUTME: Defines the validated shapes that flow through the generation pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Domain Models
//!
//! The data model of the generation pipeline, in the order it flows:
//!
//! 1. [`WorkoutGenerationRequest`] is built from an inbound message
//! 2. The model reply is validated into a [`WorkoutPlan`] of [`Segment`]s
//! 3. Derivation produces [`WorkoutMetadata`], giving an [`EnrichedWorkout`]
//! 4. The store assigns identity, yielding a [`WorkoutRecord`]
//!
//! Wire casing is camelCase to match the mobile client's API contract.

use crate::llm::MessageRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Marker recorded on workouts produced by the generation pipeline
pub const AI_AGENT_CREATOR: &str = "ai-agent";

// ============================================================================
// Conversation
// ============================================================================

/// A single message in a conversation transcript
///
/// Immutable once appended; transcript ordering is append order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Role of the sender
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// RFC3339 creation timestamp
    pub timestamp: String,
}

impl ConversationMessage {
    /// Create a message stamped with the current time
    #[must_use]
    pub fn now(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// Generation Request
// ============================================================================

/// Workout difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Low intensity, suitable for newcomers
    Beginner,
    /// Moderate intensity (the default when no keyword matches)
    #[default]
    Intermediate,
    /// High intensity
    Advanced,
}

impl Difficulty {
    /// String representation used on the wire and in storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Calorie burn rate per minute for the estimate in
    /// [`crate::trainer::metadata`]
    #[must_use]
    pub const fn calorie_rate_per_minute(&self) -> u32 {
        match self {
            Self::Beginner => 5,
            Self::Intermediate => 8,
            Self::Advanced => 11,
        }
    }

    /// Parse from a stored string, falling back to the default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "advanced" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one workout generation attempt
///
/// Constructed once per attempt and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutGenerationRequest {
    /// Opaque owner id
    pub user_id: String,
    /// Requested workout length in minutes, always positive
    pub duration_minutes: u32,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// Free-text style preferences, possibly the default string
    pub preferences: String,
}

// ============================================================================
// Workout Plan
// ============================================================================

/// Set/rep prescription: either a plain count or a text range like "12-15"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    /// Fixed repetition count
    Count(u32),
    /// Free-text range, e.g. "12-15" or "to failure"
    Range(String),
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Range(s) => f.write_str(s),
        }
    }
}

/// One exercise step within a workout section
///
/// Segments are structurally discriminated: a loaded segment carries
/// `sets`/`reps`/`restSeconds`, a timed segment carries `durationSeconds`.
/// No semantic validation of exercise names or set/rep sanity is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Set/rep-based exercise with a rest interval
    #[serde(rename_all = "camelCase")]
    Loaded {
        /// Exercise name
        name: String,
        /// Number of sets
        sets: u32,
        /// Reps per set
        reps: Reps,
        /// Rest between sets in seconds
        rest_seconds: u32,
        /// How to perform the exercise
        instructions: String,
    },
    /// Time-based exercise
    #[serde(rename_all = "camelCase")]
    Timed {
        /// Exercise name
        name: String,
        /// Duration in seconds
        duration_seconds: u32,
        /// How to perform the exercise
        instructions: String,
    },
}

impl Segment {
    /// Exercise name regardless of segment kind
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Loaded { name, .. } | Self::Timed { name, .. } => name,
        }
    }
}

/// A validated workout plan as decoded from the model reply
///
/// Each section is an ordered sequence and may be empty; an empty `main`
/// is unusual but must not break downstream derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Workout name
    pub name: String,
    /// Brief description
    pub description: String,
    /// Warm-up segments
    pub warmup: Vec<Segment>,
    /// Main workout segments
    pub main: Vec<Segment>,
    /// Cool-down segments
    pub cooldown: Vec<Segment>,
}

impl WorkoutPlan {
    /// Total number of segments across all sections
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.warmup.len() + self.main.len() + self.cooldown.len()
    }
}

/// The three plan sections as stored on a persisted workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentGroups {
    /// Warm-up segments
    pub warmup: Vec<Segment>,
    /// Main workout segments
    pub main: Vec<Segment>,
    /// Cool-down segments
    pub cooldown: Vec<Segment>,
}

impl From<&WorkoutPlan> for SegmentGroups {
    fn from(plan: &WorkoutPlan) -> Self {
        Self {
            warmup: plan.warmup.clone(),
            main: plan.main.clone(),
            cooldown: plan.cooldown.clone(),
        }
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// Metadata derived deterministically from a validated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMetadata {
    /// `durationMinutes * ratePerMinute(difficulty)`
    pub estimated_calories: u32,
    /// Deduplicated muscle-group tags from the keyword scan
    pub target_muscle_groups: BTreeSet<String>,
    /// Difficulty plus extracted preference tokens
    pub tags: Vec<String>,
    /// Total segment count across all sections
    pub exercise_count: usize,
}

/// A plan plus derived metadata, ready to persist
///
/// Created once per successful generation and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedWorkout {
    /// Workout name from the plan
    pub name: String,
    /// Description from the plan
    pub description: String,
    /// Requested duration in minutes
    pub duration_minutes: u32,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// The plan's segments
    pub exercises: SegmentGroups,
    /// Derived metadata
    pub metadata: WorkoutMetadata,
    /// Whether the pipeline produced this workout
    pub auto_generated: bool,
    /// Creator marker, [`AI_AGENT_CREATOR`] for generated workouts
    pub created_by: String,
    /// RFC3339 generation timestamp
    pub generated_at: String,
}

impl EnrichedWorkout {
    /// Assemble an enriched workout from a validated plan and its request
    #[must_use]
    pub fn from_plan(
        plan: &WorkoutPlan,
        request: &WorkoutGenerationRequest,
        metadata: WorkoutMetadata,
    ) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            duration_minutes: request.duration_minutes,
            difficulty: request.difficulty,
            exercises: SegmentGroups::from(plan),
            metadata,
            auto_generated: true,
            created_by: AI_AGENT_CREATOR.to_owned(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// Persisted Workout
// ============================================================================

/// Completion statistics, mutated only by the complete-workout operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutAnalytics {
    /// Number of times the workout was completed
    pub times_completed: i64,
    /// RFC3339 timestamp of the most recent completion, if any
    pub last_completed: Option<String>,
}

/// A stored workout with storage-assigned identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Storage-assigned id
    pub id: String,
    /// Opaque owner id
    pub user_id: String,
    /// Workout name
    pub name: String,
    /// Brief description
    pub description: String,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Plan segments
    pub exercises: SegmentGroups,
    /// Estimated calorie burn
    pub estimated_calories: u32,
    /// Muscle-group tags
    pub target_muscle_groups: BTreeSet<String>,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Total segment count across all sections
    pub exercise_count: usize,
    /// Whether the pipeline produced this workout
    pub auto_generated: bool,
    /// Creator marker
    pub created_by: String,
    /// RFC3339 generation timestamp
    pub generated_at: String,
    /// Completion statistics
    pub analytics: WorkoutAnalytics,
}
