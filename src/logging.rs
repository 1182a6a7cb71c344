// ABOUTME: Logging configuration and structured logging setup for the trainer backend
// ABOUTME: Configures log levels and output formats from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! Structured logging configuration
//!
//! Logging is configured entirely from the environment:
//!
//! - `RUST_LOG`: standard env-filter directives (default `info`)
//! - `WOT_LOG_FORMAT`: `pretty` (default), `compact`, or `json`

use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output for development
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Structured JSON for log aggregation
    Json,
}

impl LogFormat {
    /// Parse from string with fallback to the default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Initialize logging from environment variables
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = env::var("WOT_LOG_FORMAT")
        .map(|v| LogFormat::from_str_or_default(&v))
        .unwrap_or_default();

    let fmt_layer = match format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    info!("Logging initialized (format: {format:?})");
    Ok(())
}
