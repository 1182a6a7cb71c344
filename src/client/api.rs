// ABOUTME: HTTP client for the trainer API with a bounded request timeout
// ABOUTME: Maps transport failures and server error bodies to typed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # API Client
//!
//! Thin typed wrapper over the HTTP surface. Every request carries the
//! configured timeout; network failures and undecodable replies surface as
//! [`TransportFailure`], while structured server errors keep the code the
//! server assigned.
//!
//! [`TransportFailure`]: crate::errors::ErrorCode::TransportFailure

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::models::WorkoutRecord;
use crate::routes::trainer::{
    ConversationResponse, ExerciseFormResponse, GenerateWorkoutRequest, GenerateWorkoutResponse,
    SendMessageRequest, SendMessageResponse,
};
use crate::routes::workouts::{CompleteWorkoutRequest, SaveWorkoutRequest, WorkoutListResponse};

/// Default per-request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Typed client for the trainer backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        Self::with_timeout(base_url, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Create a client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config("failed to build HTTP client").with_source(e))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Send one trainer message
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> AppResult<SendMessageResponse> {
        let response = self
            .http
            .post(self.url("/api/trainer/message"))
            .json(request)
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// Fetch a conversation transcript
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn get_conversation(
        &self,
        user_id: &str,
        conversation_id: Option<&str>,
    ) -> AppResult<ConversationResponse> {
        let mut query = vec![("userId", user_id)];
        if let Some(id) = conversation_id {
            query.push(("conversationId", id));
        }

        let response = self
            .http
            .get(self.url("/api/trainer/conversation"))
            .query(&query)
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// Generate a workout from explicit parameters
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn generate_workout(
        &self,
        request: &GenerateWorkoutRequest,
    ) -> AppResult<GenerateWorkoutResponse> {
        let response = self
            .http
            .post(self.url("/api/generate-workout"))
            .json(request)
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// Fetch form guidance for a named exercise
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn exercise_form(&self, exercise: &str) -> AppResult<ExerciseFormResponse> {
        let response = self
            .http
            .get(self.url(&format!("/api/trainer/exercise-form/{exercise}")))
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// List the user's workouts
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn list_workouts(&self, user_id: &str) -> AppResult<WorkoutListResponse> {
        let response = self
            .http
            .get(self.url("/api/workouts"))
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// Save a client-built workout
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn save_workout(&self, request: &SaveWorkoutRequest) -> AppResult<WorkoutRecord> {
        let response = self
            .http
            .post(self.url("/api/workouts"))
            .json(request)
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    /// Delete a workout
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn delete_workout(&self, workout_id: &str, user_id: &str) -> AppResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/workouts/{workout_id}")))
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(into_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(decode_error(response).await)
        }
    }

    /// Record one completion of a workout
    ///
    /// # Errors
    ///
    /// Returns the server's typed error, or `TransportFailure` when the
    /// server cannot be reached.
    pub async fn complete_workout(
        &self,
        workout_id: &str,
        user_id: &str,
    ) -> AppResult<WorkoutRecord> {
        let request = CompleteWorkoutRequest {
            user_id: user_id.to_owned(),
            duration: None,
        };
        let response = self
            .http
            .post(self.url(&format!("/api/workouts/{workout_id}/complete")))
            .json(&request)
            .send()
            .await
            .map_err(into_transport)?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn into_transport(e: reqwest::Error) -> AppError {
    AppError::transport("request to server failed").with_source(e)
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    if response.status().is_success() {
        response
            .json()
            .await
            .map_err(|e| AppError::transport("failed to decode server response").with_source(e))
    } else {
        Err(decode_error(response).await)
    }
}

async fn decode_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => AppError::new(body.error.code, body.error.message),
        Err(e) => AppError::transport(format!("server returned {status}")).with_source(e),
    }
}
