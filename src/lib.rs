// ABOUTME: Main library entry point for the WOT AI Trainer backend
// ABOUTME: Exposes the message-to-workout pipeline, HTTP routes, and client state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # WOT AI Trainer
//!
//! Backend for a conversational fitness assistant. A mobile client exchanges
//! natural-language messages with this server, which classifies intent,
//! optionally asks a generative model for a structured workout plan,
//! validates and enriches the plan with derived metadata, persists it, and
//! returns both a human-readable reply and the structured artifact.
//!
//! ## Architecture
//!
//! - **`trainer`**: the core pipeline: intent classification, parameter
//!   extraction, prompt construction, response parsing, metadata derivation,
//!   and the conversation orchestrator
//! - **`llm`**: generative-text capability behind the `LlmProvider` trait
//!   (Gemini implementation included)
//! - **`database`**: SQLite persistence for conversations and the workout
//!   library
//! - **`routes`**: axum REST surface (`/api/trainer/*`, `/api/workouts`)
//! - **`client`**: transport client plus the reducer-style conversation
//!   state machine that drives a chat UI
//!
//! ## Example
//!
//! ```rust,no_run
//! use wot_trainer::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("WOT trainer configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Client-side transport and conversation state machine
pub mod client;

/// Environment-based configuration
pub mod config;

/// SQLite persistence for conversations and workouts
pub mod database;

/// Unified error handling
pub mod errors;

/// Generative-text provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Core domain models
pub mod models;

/// Shared server resources for dependency injection
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Message-to-workout pipeline
pub mod trainer;
