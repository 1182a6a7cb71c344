// ABOUTME: Trainer route handlers for conversational workout generation
// ABOUTME: Exposes message handling, transcript retrieval, generation, and form guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! Trainer routes
//!
//! The conversational surface of the backend: send a message, fetch the
//! transcript, generate a workout directly, or ask for exercise form
//! guidance. All handlers delegate to [`TrainerService`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{ConversationMessage, Difficulty, WorkoutGenerationRequest, WorkoutRecord};
use crate::resources::ServerResources;
use crate::trainer::extractor::DEFAULT_PREFERENCES;
use crate::trainer::TrainerService;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to send a trainer message
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Message text
    pub message: String,
    /// Opaque user id
    pub user_id: String,
    /// Conversation to continue, if any
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Reply to a trainer message
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    /// Assistant reply text
    pub response: String,
    /// Conversation the exchange was recorded under
    pub conversation_id: String,
    /// Whether a workout was generated
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub workout_generated: bool,
    /// Id of the generated workout, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workout_id: Option<String>,
    /// The generated workout, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workout: Option<WorkoutRecord>,
}

/// Query parameters for transcript retrieval
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    /// Opaque user id
    pub user_id: String,
    /// Specific conversation, defaults to the most recent
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// A conversation transcript
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    /// Conversation id
    pub conversation_id: String,
    /// Messages in append order
    pub messages: Vec<ConversationMessage>,
}

/// Request for direct workout generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutRequest {
    /// Opaque user id
    pub user_id: String,
    /// Workout length in minutes
    pub duration: u32,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Style preferences
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Response for direct workout generation
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateWorkoutResponse {
    /// Always true on the success path
    pub success: bool,
    /// The persisted workout
    pub workout: WorkoutRecord,
    /// Confirmation text
    pub message: String,
}

/// Response for exercise form guidance
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseFormResponse {
    /// Exercise name as requested
    pub exercise: String,
    /// Guidance text
    pub guidance: String,
}

// ============================================================================
// Routes
// ============================================================================

/// Trainer routes implementation
pub struct TrainerRoutes;

impl TrainerRoutes {
    /// Create all trainer routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/trainer/message", post(Self::send_message))
            .route("/api/trainer/conversation", get(Self::get_conversation))
            .route("/api/generate-workout", post(Self::generate_workout))
            .route(
                "/api/trainer/exercise-form/:exercise",
                get(Self::exercise_form),
            )
            .with_state(resources)
    }

    /// Handle one conversational message
    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SendMessageRequest>,
    ) -> Result<Response, AppError> {
        let service = TrainerService::new(resources);
        let reply = service
            .handle_message(
                &request.user_id,
                &request.message,
                request.conversation_id.as_deref(),
            )
            .await?;

        let response = SendMessageResponse {
            response: reply.response,
            conversation_id: reply.conversation_id,
            workout_generated: reply.workout_generated,
            workout_id: reply.workout.as_ref().map(|w| w.id.clone()),
            workout: reply.workout,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Fetch a conversation transcript
    async fn get_conversation(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ConversationQuery>,
    ) -> Result<Response, AppError> {
        let service = TrainerService::new(resources);
        let (conversation_id, messages) = service
            .conversation(&query.user_id, query.conversation_id.as_deref())
            .await?;

        let response = ConversationResponse {
            conversation_id,
            messages,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Generate and persist a workout from explicit parameters
    async fn generate_workout(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<GenerateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let generation = WorkoutGenerationRequest {
            user_id: request.user_id,
            duration_minutes: request.duration,
            difficulty: request.difficulty,
            preferences: request
                .preferences
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PREFERENCES.to_owned()),
        };

        let service = TrainerService::new(resources);
        let workout = service.generate_workout(&generation).await?;

        let response = GenerateWorkoutResponse {
            success: true,
            message: format!("Workout \"{}\" generated and saved", workout.name),
            workout,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Produce form guidance for a named exercise
    async fn exercise_form(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise): Path<String>,
    ) -> Result<Response, AppError> {
        let service = TrainerService::new(resources);
        let guidance = service.exercise_form_guidance(&exercise).await?;

        let response = ExerciseFormResponse { exercise, guidance };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
