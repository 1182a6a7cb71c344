// ABOUTME: The message-to-structured-workout pipeline
// ABOUTME: Intent classification, extraction, prompting, parsing, enrichment, orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Trainer Pipeline
//!
//! The pipeline turns a free-text message into a persisted, enriched
//! workout:
//!
//! ```text
//! message -> intent -> extractor -> prompt -> model -> parser -> metadata -> store
//! ```
//!
//! Every stage is a pure function except the model call and the store
//! write, both of which the [`service::TrainerService`] awaits with a
//! bounded timeout.

/// Parameter extraction from free text
pub mod extractor;

/// Intent classification rule table
pub mod intent;

/// Calorie, muscle-group, and tag derivation
pub mod metadata;

/// JSON span extraction and shape validation
pub mod parser;

/// Generation prompt with the strict output-format contract
pub mod prompt;

/// Conversation orchestrator
pub mod service;

pub use extractor::{extract_parameters, ExtractedParameters};
pub use intent::is_workout_request;
pub use metadata::derive_metadata;
pub use parser::parse_workout_plan;
pub use prompt::build_workout_prompt;
pub use service::{TrainerReply, TrainerService};
