// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, and model timeout from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! Environment-based configuration
//!
//! All runtime settings come from environment variables with sensible
//! defaults for local development:
//!
//! - `WOT_HTTP_PORT`: HTTP listen port (default 5000)
//! - `WOT_DATABASE_URL`: SQLite connection string (default `sqlite:./data/wot_trainer.db`)
//! - `WOT_MODEL_TIMEOUT_MS`: bounded wait for model and store calls (default 10000)
//! - `WOT_LLM_MODEL`: model identifier passed to the generative provider

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Default bounded wait for the model call and the store write
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 10_000;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/wot_trainer.db";

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection string
    pub database_url: String,
    /// Bounded wait applied to model calls
    pub model_timeout: Duration,
    /// Model identifier override for the generative provider
    pub llm_model: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("WOT_HTTP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid WOT_HTTP_PORT: {v}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("WOT_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let model_timeout_ms = match env::var("WOT_MODEL_TIMEOUT_MS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("invalid WOT_MODEL_TIMEOUT_MS: {v}"))?,
            Err(_) => DEFAULT_MODEL_TIMEOUT_MS,
        };

        let llm_model = env::var("WOT_LLM_MODEL").ok();

        Ok(Self {
            http_port,
            database_url,
            model_timeout: Duration::from_millis(model_timeout_ms),
            llm_model,
        })
    }

    /// One-line summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} model_timeout={}ms model={}",
            self.http_port,
            self.database_url,
            self.model_timeout.as_millis(),
            self.llm_model.as_deref().unwrap_or("provider default"),
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            model_timeout: Duration::from_millis(DEFAULT_MODEL_TIMEOUT_MS),
            llm_model: None,
        }
    }
}
