// ABOUTME: Conversation orchestrator wiring intent, generation, chat, and persistence
// ABOUTME: Runs the full message-to-workout pipeline with a bounded model wait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Trainer Service
//!
//! The orchestrator behind the trainer endpoints. An inbound message is
//! classified; workout requests run the generation pipeline, everything
//! else gets a conversational reply. Both paths append to the persisted
//! transcript, and both the model call and the workout store write are
//! wrapped in a bounded wait.
//!
//! Pipeline failures keep their typed code but replace the message with a
//! generic one before they leave this module. The full detail goes to the
//! log, never to the caller.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::errors::{AppError, AppResult};
use crate::llm::prompts::{form_guidance_prompt, get_trainer_system_prompt};
use crate::llm::{ChatMessage, ChatRequest, ChatResponse, MessageRole};
use crate::models::{
    ConversationMessage, EnrichedWorkout, WorkoutGenerationRequest, WorkoutRecord,
};
use crate::resources::ServerResources;
use crate::trainer::{
    build_workout_prompt, derive_metadata, extract_parameters, is_workout_request,
    parse_workout_plan,
};

/// Generic reply text used when a pipeline failure reaches the caller
pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't process that message. Please try again.";

/// Outcome of handling one trainer message
#[derive(Debug, Clone)]
pub struct TrainerReply {
    /// Assistant reply text
    pub response: String,
    /// Conversation the exchange was recorded under
    pub conversation_id: String,
    /// Whether the message triggered workout generation
    pub workout_generated: bool,
    /// The persisted workout, when one was generated
    pub workout: Option<WorkoutRecord>,
}

/// Orchestrator for the conversational trainer
pub struct TrainerService {
    resources: Arc<ServerResources>,
}

impl TrainerService {
    /// Create a service over the shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle one inbound trainer message
    ///
    /// Resolves the conversation, appends the user message, then either
    /// runs the generation pipeline or produces a chat reply. The
    /// assistant reply is appended before returning, so the transcript
    /// always reflects what the caller saw.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty input. Pipeline failures keep
    /// their code with a generic message.
    #[instrument(skip(self, message), fields(user = %user_id))]
    pub async fn handle_message(
        &self,
        user_id: &str,
        message: &str,
        conversation_id: Option<&str>,
    ) -> AppResult<TrainerReply> {
        if user_id.trim().is_empty() {
            return Err(AppError::invalid_input("userId must not be empty"));
        }
        if message.trim().is_empty() {
            return Err(AppError::invalid_input("message must not be empty"));
        }

        let conversations = self.resources.database.conversations();
        let conversation_id = conversations.get_or_create(user_id, conversation_id).await?;
        conversations
            .add_message(
                &conversation_id,
                user_id,
                &ConversationMessage::now(MessageRole::User, message),
            )
            .await?;

        let outcome = if is_workout_request(message) {
            self.workout_reply(user_id, message).await
        } else {
            self.chat_reply(&conversation_id, user_id).await
        };

        match outcome {
            Ok((response, workout)) => {
                conversations
                    .add_message(
                        &conversation_id,
                        user_id,
                        &ConversationMessage::now(MessageRole::Assistant, &response),
                    )
                    .await?;

                Ok(TrainerReply {
                    response,
                    conversation_id,
                    workout_generated: workout.is_some(),
                    workout,
                })
            }
            Err(e) => {
                error!("trainer pipeline failed: {e}");
                Err(AppError::new(e.code, FALLBACK_MESSAGE))
            }
        }
    }

    /// Run the full generation pipeline for one request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero duration, `ModelUnavailable` on
    /// timeout or provider failure, `MalformedResponse`/`InvalidShape`
    /// for unusable replies, and `PersistenceFailure` when the save is
    /// rejected or outlives the same bounded wait.
    #[instrument(skip(self, request), fields(user = %request.user_id))]
    pub async fn generate_workout(
        &self,
        request: &WorkoutGenerationRequest,
    ) -> AppResult<WorkoutRecord> {
        if request.duration_minutes == 0 {
            return Err(AppError::invalid_input("duration must be positive"));
        }

        let prompt = build_workout_prompt(request);
        let reply = self
            .complete(vec![
                ChatMessage::system(get_trainer_system_prompt()),
                ChatMessage::user(prompt),
            ])
            .await?;

        let plan = parse_workout_plan(&reply.content)?;
        let metadata = derive_metadata(&plan, request);
        let enriched = EnrichedWorkout::from_plan(&plan, request, metadata);

        let record = bounded_write(
            self.resources.config.model_timeout,
            self.resources
                .database
                .workouts()
                .insert(&request.user_id, &enriched),
        )
        .await?;

        info!(
            "generated workout {} ({} segments) for user {}",
            record.id,
            record.exercises.warmup.len()
                + record.exercises.main.len()
                + record.exercises.cooldown.len(),
            request.user_id
        );
        Ok(record)
    }

    /// Produce form guidance for a named exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty exercise name and
    /// `ModelUnavailable` when the model cannot reply.
    pub async fn exercise_form_guidance(&self, exercise: &str) -> AppResult<String> {
        if exercise.trim().is_empty() {
            return Err(AppError::invalid_input("exercise must not be empty"));
        }

        let reply = self
            .complete(vec![
                ChatMessage::system(get_trainer_system_prompt()),
                ChatMessage::user(form_guidance_prompt(exercise)),
            ])
            .await?;
        Ok(reply.content)
    }

    /// Resolve a conversation and return its transcript
    ///
    /// A missing id resolves to the user's most recent conversation, or a
    /// fresh empty one when the user has none.
    ///
    /// # Errors
    ///
    /// Returns a database error when the lookup fails.
    pub async fn conversation(
        &self,
        user_id: &str,
        conversation_id: Option<&str>,
    ) -> AppResult<(String, Vec<ConversationMessage>)> {
        if user_id.trim().is_empty() {
            return Err(AppError::invalid_input("userId must not be empty"));
        }

        let conversations = self.resources.database.conversations();
        let id = match conversation_id {
            Some(id) => conversations.get_or_create(user_id, Some(id)).await?,
            None => match conversations.latest_for_user(user_id).await? {
                Some(id) => id,
                None => conversations.create(user_id).await?,
            },
        };

        let messages = conversations.messages(&id, user_id).await?;
        Ok((id, messages))
    }

    /// Generation path: extract parameters, generate, confirm
    async fn workout_reply(
        &self,
        user_id: &str,
        message: &str,
    ) -> AppResult<(String, Option<WorkoutRecord>)> {
        let params = extract_parameters(message);
        let request = WorkoutGenerationRequest {
            user_id: user_id.to_owned(),
            duration_minutes: params.duration_minutes,
            difficulty: params.difficulty,
            preferences: params.preferences,
        };

        let record = self.generate_workout(&request).await?;
        let response = format!(
            "Great! I've created a {duration}-minute {difficulty} workout for you: \
\"{name}\". It's been automatically saved to your library!\n\n\
Here's what I've prepared:\n\
- Duration: {duration} minutes\n\
- Difficulty: {difficulty}\n\
- Estimated calories: {calories}\n\n\
Would you like me to walk you through the exercises?",
            duration = record.duration_minutes,
            difficulty = record.difficulty,
            name = record.name,
            calories = record.estimated_calories,
        );
        Ok((response, Some(record)))
    }

    /// Chat path: reply from the transcript so far
    async fn chat_reply(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<(String, Option<WorkoutRecord>)> {
        let transcript = self
            .resources
            .database
            .conversations()
            .messages(conversation_id, user_id)
            .await?;

        let mut messages = vec![ChatMessage::system(get_trainer_system_prompt())];
        messages.extend(
            transcript
                .into_iter()
                .map(|m| ChatMessage::new(m.role, m.content)),
        );

        let reply = self.complete(messages).await?;
        Ok((reply.content, None))
    }

    /// One model call under the configured timeout
    async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<ChatResponse> {
        let mut request = ChatRequest::new(messages);
        if let Some(model) = &self.resources.config.llm_model {
            request = request.with_model(model.clone());
        }

        let timeout = self.resources.config.model_timeout;
        match tokio::time::timeout(timeout, self.resources.llm.complete(&request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("model call exceeded {}ms budget", timeout.as_millis());
                Err(AppError::model_unavailable(format!(
                    "model call timed out after {}ms",
                    timeout.as_millis()
                )))
            }
        }
    }
}

/// Await a store write under a deadline
///
/// A write that outlives the deadline reports `PersistenceFailure`, the
/// same code a rejected write carries, so callers see one failure mode for
/// a workout that was not saved.
async fn bounded_write<T>(
    limit: std::time::Duration,
    write: impl std::future::Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, write).await {
        Ok(result) => result,
        Err(_) => {
            warn!("store write exceeded {}ms budget", limit.as_millis());
            Err(AppError::persistence(format!(
                "store write timed out after {}ms",
                limit.as_millis()
            )))
        }
    }
}
