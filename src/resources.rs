// ABOUTME: Shared server resources passed to route handlers and the orchestrator
// ABOUTME: Bundles the database, the generative provider, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! Focused dependency injection for the HTTP layer
//!
//! One `Arc<ServerResources>` is created at startup and cloned into every
//! router. Requests own their own pipeline objects; the only shared state
//! is the database pool and the provider, both internally synchronized.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::LlmProvider;

/// Resources shared across all request handlers
pub struct ServerResources {
    /// Conversation and workout persistence
    pub database: Database,
    /// Generative-text capability
    pub llm: Arc<dyn LlmProvider>,
    /// Runtime configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the resources for injection into routers
    #[must_use]
    pub fn new(database: Database, llm: Arc<dyn LlmProvider>, config: ServerConfig) -> Self {
        Self {
            database,
            llm,
            config,
        }
    }
}
