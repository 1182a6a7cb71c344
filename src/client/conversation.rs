// ABOUTME: Conversation view state machine and its API-driving controller
// ABOUTME: Pure event reducer over messages, loading, typing, and error state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Conversation State Machine
//!
//! The chat screen's state as a pure reducer: [`ConversationState::apply`]
//! folds [`ConversationEvent`]s into the next state and never touches the
//! network. Events that make no sense in the current state are ignored
//! rather than panicking, so a late reply after a reload cannot corrupt
//! the view.
//!
//! [`ConversationController`] drives the reducer from [`ApiClient`] calls:
//! the user message is appended optimistically before the request goes
//! out, and a failed send keeps it in place with an error banner so retry
//! has something to show.

use tracing::debug;

use crate::client::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::llm::MessageRole;
use crate::models::{ConversationMessage, WorkoutRecord};
use crate::routes::trainer::SendMessageRequest;

/// Error banner shown when the transcript cannot be loaded
pub const LOAD_ERROR_TEXT: &str = "Failed to load conversation";

/// Error banner shown when a send fails
pub const SEND_ERROR_TEXT: &str = "Failed to send message. Please check your connection.";

/// What a completed exchange produced beyond the transcript text
#[derive(Debug, Clone)]
pub enum ReplyPayload {
    /// A plain conversational reply
    Message,
    /// The message triggered workout generation
    Workout(WorkoutRecord),
    /// Form guidance for a named exercise
    ExerciseForm {
        /// Exercise name as requested
        exercise: String,
        /// Guidance text
        guidance: String,
    },
}

/// Events that drive the conversation state machine
#[derive(Debug, Clone)]
pub enum ConversationEvent {
    /// A transcript load began
    LoadStarted,
    /// The transcript arrived
    HistoryLoaded {
        /// Conversation the transcript belongs to
        conversation_id: String,
        /// Full transcript in append order
        messages: Vec<ConversationMessage>,
    },
    /// The transcript load failed
    LoadFailed,
    /// A send began; the user message is appended immediately
    SendStarted {
        /// The optimistically appended user message
        message: ConversationMessage,
    },
    /// The assistant reply arrived
    ReplyReceived {
        /// Conversation the exchange was recorded under, when the server
        /// threaded one
        conversation_id: Option<String>,
        /// The assistant message
        message: ConversationMessage,
    },
    /// The send failed; the optimistic message stays
    SendFailed,
    /// The error banner was dismissed
    ErrorCleared,
}

/// Observable state of the conversation view
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Transcript in display order
    pub messages: Vec<ConversationMessage>,
    /// Server-assigned conversation id, once known
    pub conversation_id: Option<String>,
    /// A transcript load is in flight
    pub is_loading: bool,
    /// A send is in flight and the assistant is "typing"
    pub is_typing: bool,
    /// Error banner text, if any
    pub error: Option<String>,
}

impl ConversationState {
    /// Fold one event into the state
    ///
    /// Out-of-order events are dropped: a reply or failure without a send
    /// in flight, or a transcript without a load in flight, leaves the
    /// state untouched.
    pub fn apply(&mut self, event: ConversationEvent) {
        match event {
            ConversationEvent::LoadStarted => {
                self.is_loading = true;
                self.error = None;
            }
            ConversationEvent::HistoryLoaded {
                conversation_id,
                messages,
            } => {
                if !self.is_loading {
                    debug!("dropping transcript, no load in flight");
                    return;
                }
                self.messages = messages;
                self.conversation_id = Some(conversation_id);
                self.is_loading = false;
            }
            ConversationEvent::LoadFailed => {
                if !self.is_loading {
                    return;
                }
                self.is_loading = false;
                self.error = Some(LOAD_ERROR_TEXT.to_owned());
            }
            ConversationEvent::SendStarted { message } => {
                self.messages.push(message);
                self.is_typing = true;
                self.error = None;
            }
            ConversationEvent::ReplyReceived {
                conversation_id,
                message,
            } => {
                if !self.is_typing {
                    debug!("dropping reply, no send in flight");
                    return;
                }
                self.messages.push(message);
                if conversation_id.is_some() {
                    self.conversation_id = conversation_id;
                }
                self.is_typing = false;
            }
            ConversationEvent::SendFailed => {
                if !self.is_typing {
                    return;
                }
                self.is_typing = false;
                self.error = Some(SEND_ERROR_TEXT.to_owned());
            }
            ConversationEvent::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

/// Drives the conversation state machine from API calls
pub struct ConversationController {
    api: ApiClient,
    user_id: String,
    state: ConversationState,
}

impl ConversationController {
    /// Create a controller for one user's conversation
    #[must_use]
    pub fn new(api: ApiClient, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            state: ConversationState::default(),
        }
    }

    /// Current view state
    #[must_use]
    pub const fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Load or reload the transcript from the server
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a send is still in flight, otherwise
    /// the API error after recording the failure in the state.
    pub async fn load_conversation(&mut self) -> AppResult<()> {
        if self.state.is_typing {
            return Err(AppError::invalid_input(
                "cannot reload while a send is in flight",
            ));
        }

        self.state.apply(ConversationEvent::LoadStarted);
        match self
            .api
            .get_conversation(&self.user_id, self.state.conversation_id.as_deref())
            .await
        {
            Ok(transcript) => {
                self.state.apply(ConversationEvent::HistoryLoaded {
                    conversation_id: transcript.conversation_id,
                    messages: transcript.messages,
                });
                Ok(())
            }
            Err(e) => {
                self.state.apply(ConversationEvent::LoadFailed);
                Err(e)
            }
        }
    }

    /// Send one message and fold the reply into the state
    ///
    /// Returns [`ReplyPayload::Workout`] when the message triggered the
    /// generation pipeline, otherwise [`ReplyPayload::Message`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty text or a send already in flight,
    /// otherwise the API error after recording the failure in the state.
    pub async fn send_message(&mut self, text: &str) -> AppResult<ReplyPayload> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("message must not be empty"));
        }
        if self.state.is_typing {
            return Err(AppError::invalid_input("a send is already in flight"));
        }

        self.state.apply(ConversationEvent::SendStarted {
            message: ConversationMessage::now(MessageRole::User, text),
        });

        let request = SendMessageRequest {
            message: text.to_owned(),
            user_id: self.user_id.clone(),
            conversation_id: self.state.conversation_id.clone(),
        };

        match self.api.send_message(&request).await {
            Ok(reply) => {
                self.state.apply(ConversationEvent::ReplyReceived {
                    conversation_id: Some(reply.conversation_id),
                    message: ConversationMessage::now(MessageRole::Assistant, reply.response),
                });
                Ok(reply
                    .workout
                    .map_or(ReplyPayload::Message, ReplyPayload::Workout))
            }
            Err(e) => {
                self.state.apply(ConversationEvent::SendFailed);
                Err(e)
            }
        }
    }

    /// Ask for form guidance and fold it into the transcript
    ///
    /// Guidance is a client-side exchange: the question and answer appear
    /// in the view but are not part of the server transcript.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty exercise name or a send already
    /// in flight, otherwise the API error after recording the failure.
    pub async fn request_exercise_form(&mut self, exercise: &str) -> AppResult<ReplyPayload> {
        let exercise = exercise.trim();
        if exercise.is_empty() {
            return Err(AppError::invalid_input("exercise must not be empty"));
        }
        if self.state.is_typing {
            return Err(AppError::invalid_input("a send is already in flight"));
        }

        self.state.apply(ConversationEvent::SendStarted {
            message: ConversationMessage::now(
                MessageRole::User,
                format!("How do I perform {exercise} with proper form?"),
            ),
        });

        match self.api.exercise_form(exercise).await {
            Ok(form) => {
                self.state.apply(ConversationEvent::ReplyReceived {
                    conversation_id: None,
                    message: ConversationMessage::now(
                        MessageRole::Assistant,
                        form.guidance.clone(),
                    ),
                });
                Ok(ReplyPayload::ExerciseForm {
                    exercise: form.exercise,
                    guidance: form.guidance,
                })
            }
            Err(e) => {
                self.state.apply(ConversationEvent::SendFailed);
                Err(e)
            }
        }
    }

    /// Retry after a failure by reloading the transcript
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::load_conversation`].
    pub async fn retry(&mut self) -> AppResult<()> {
        self.state.apply(ConversationEvent::ErrorCleared);
        self.load_conversation().await
    }

    /// Dismiss the error banner
    pub fn clear_error(&mut self) {
        self.state.apply(ConversationEvent::ErrorCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> ConversationMessage {
        ConversationMessage::now(MessageRole::User, text)
    }

    fn assistant(text: &str) -> ConversationMessage {
        ConversationMessage::now(MessageRole::Assistant, text)
    }

    #[test]
    fn test_load_cycle() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::LoadStarted);
        assert!(state.is_loading);

        state.apply(ConversationEvent::HistoryLoaded {
            conversation_id: "c1".to_owned(),
            messages: vec![user("hi"), assistant("hello")],
        });
        assert!(!state.is_loading);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.conversation_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_load_failure_sets_banner() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::LoadStarted);
        state.apply(ConversationEvent::LoadFailed);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_TEXT));
    }

    #[test]
    fn test_send_cycle_appends_both_sides() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::SendStarted {
            message: user("make me a workout"),
        });
        assert!(state.is_typing);
        assert_eq!(state.messages.len(), 1);

        state.apply(ConversationEvent::ReplyReceived {
            conversation_id: Some("c1".to_owned()),
            message: assistant("done!"),
        });
        assert!(!state.is_typing);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.conversation_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_reply_without_conversation_keeps_existing_id() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::LoadStarted);
        state.apply(ConversationEvent::HistoryLoaded {
            conversation_id: "c1".to_owned(),
            messages: vec![],
        });

        state.apply(ConversationEvent::SendStarted {
            message: user("how do I squat?"),
        });
        state.apply(ConversationEvent::ReplyReceived {
            conversation_id: None,
            message: assistant("keep your back straight"),
        });

        assert_eq!(state.conversation_id.as_deref(), Some("c1"));
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_failed_send_keeps_optimistic_message() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::SendStarted {
            message: user("hello?"),
        });
        state.apply(ConversationEvent::SendFailed);

        assert!(!state.is_typing);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.error.as_deref(), Some(SEND_ERROR_TEXT));
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        let mut state = ConversationState::default();

        // Reply with no send in flight
        state.apply(ConversationEvent::ReplyReceived {
            conversation_id: Some("c1".to_owned()),
            message: assistant("stale"),
        });
        assert!(state.messages.is_empty());
        assert!(state.conversation_id.is_none());

        // Transcript with no load in flight
        state.apply(ConversationEvent::HistoryLoaded {
            conversation_id: "c1".to_owned(),
            messages: vec![user("stale")],
        });
        assert!(state.messages.is_empty());

        // Failures with nothing in flight
        state.apply(ConversationEvent::SendFailed);
        state.apply(ConversationEvent::LoadFailed);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_send_clears_previous_error() {
        let mut state = ConversationState::default();
        state.apply(ConversationEvent::LoadStarted);
        state.apply(ConversationEvent::LoadFailed);
        assert!(state.error.is_some());

        state.apply(ConversationEvent::SendStarted {
            message: user("try again"),
        });
        assert!(state.error.is_none());
    }
}
