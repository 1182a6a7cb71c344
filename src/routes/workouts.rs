// ABOUTME: Workout library route handlers
// ABOUTME: Exposes listing, saving, deleting, and completing stored workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! Workout library routes
//!
//! CRUD surface over persisted workouts. Generated workouts arrive through
//! the trainer pipeline; this module covers the library view plus manual
//! saves from the client.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{
    Difficulty, EnrichedWorkout, SegmentGroups, WorkoutPlan, WorkoutRecord,
};
use crate::resources::ServerResources;
use crate::trainer::metadata::{build_tags, estimate_calories, target_muscle_groups};

/// Creator marker recorded on manually saved workouts
const USER_CREATOR: &str = "user";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters scoping library operations to a user
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    /// Opaque user id
    pub user_id: String,
}

/// Response for listing a user's workouts
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    /// Workouts, most recently generated first
    pub workouts: Vec<WorkoutRecord>,
    /// Total count
    pub total: usize,
}

/// Request to save a client-built workout
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkoutRequest {
    /// Opaque user id
    pub user_id: String,
    /// Workout name
    pub name: String,
    /// Brief description
    #[serde(default)]
    pub description: String,
    /// Workout length in minutes
    pub duration_minutes: u32,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Plan segments
    pub exercises: SegmentGroups,
}

/// Request to record a workout completion
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteWorkoutRequest {
    /// Opaque user id
    pub user_id: String,
    /// Minutes actually performed; accepted for wire compatibility but
    /// not recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

// ============================================================================
// Routes
// ============================================================================

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout library routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::list_workouts))
            .route("/api/workouts", post(Self::save_workout))
            .route("/api/workouts/:workout_id", delete(Self::delete_workout))
            .route(
                "/api/workouts/:workout_id/complete",
                post(Self::complete_workout),
            )
            .with_state(resources)
    }

    /// List the user's workouts
    async fn list_workouts(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let workouts = resources.database.workouts().list(&query.user_id).await?;
        let total = workouts.len();
        Ok((StatusCode::OK, Json(WorkoutListResponse { workouts, total })).into_response())
    }

    /// Save a workout built on the client
    ///
    /// Metadata is derived server-side so manual saves carry the same
    /// calorie, muscle-group, and tag enrichment as generated ones.
    async fn save_workout(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SaveWorkoutRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("workout name must not be empty"));
        }
        if request.duration_minutes == 0 {
            return Err(AppError::invalid_input("duration must be positive"));
        }

        let plan = WorkoutPlan {
            name: request.name,
            description: request.description,
            warmup: request.exercises.warmup,
            main: request.exercises.main,
            cooldown: request.exercises.cooldown,
        };

        let workout = EnrichedWorkout {
            name: plan.name.clone(),
            description: plan.description.clone(),
            duration_minutes: request.duration_minutes,
            difficulty: request.difficulty,
            exercises: SegmentGroups::from(&plan),
            metadata: crate::models::WorkoutMetadata {
                estimated_calories: estimate_calories(
                    request.duration_minutes,
                    request.difficulty,
                ),
                target_muscle_groups: target_muscle_groups(&plan),
                tags: build_tags(request.difficulty, ""),
                exercise_count: plan.exercise_count(),
            },
            auto_generated: false,
            created_by: USER_CREATOR.to_owned(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        };

        let record = resources
            .database
            .workouts()
            .insert(&request.user_id, &workout)
            .await?;
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Delete a workout the user owns
    async fn delete_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<String>,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let removed = resources
            .database
            .workouts()
            .delete(&workout_id, &query.user_id)
            .await?;

        if removed {
            Ok(StatusCode::NO_CONTENT.into_response())
        } else {
            Err(AppError::not_found("workout"))
        }
    }

    /// Record one completion of a workout
    async fn complete_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<String>,
        Json(request): Json<CompleteWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let record = resources
            .database
            .workouts()
            .record_completion(&workout_id, &request.user_id)
            .await?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }
}
