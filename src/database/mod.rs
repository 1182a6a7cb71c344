// ABOUTME: Database connection management and schema migrations
// ABOUTME: Provides the Database handle and accessors for the domain managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Database Layer
//!
//! `SQLite` persistence for conversations and workouts. [`Database`] owns
//! the pool and runs migrations at connect time; domain access goes through
//! [`ConversationManager`] and [`WorkoutManager`].

pub mod conversations;
pub mod workouts;

pub use conversations::ConversationManager;
pub use workouts::WorkoutManager;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Maximum connections in the pool
const MAX_CONNECTIONS: u32 = 5;

/// Database handle shared across the server
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations
    ///
    /// File-backed URLs get `?mode=rwc` appended so the database file is
    /// created on first run.
    ///
    /// # Errors
    ///
    /// Returns a database error when the connection or a migration fails.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let url = if in_memory || database_url.contains('?') {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        // An in-memory database exists per connection, so the pool must
        // not grow past one.
        let max_connections = if in_memory { 1 } else { MAX_CONNECTIONS };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .map_err(|e| {
                AppError::database(format!("failed to connect to {database_url}")).with_source(e)
            })?;

        let database = Self { pool };
        database.migrate().await?;
        info!("database ready at {database_url}");
        Ok(database)
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Conversation persistence operations
    #[must_use]
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.pool.clone())
    }

    /// Workout persistence operations
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Create tables if they do not exist
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to create conversations table").with_source(e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversation_messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL REFERENCES conversations(id),
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database("failed to create conversation_messages table").with_source(e)
        })?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_messages_conversation
                ON conversation_messages(conversation_id, created_at)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to create message index").with_source(e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                difficulty TEXT NOT NULL,
                exercises TEXT NOT NULL,
                estimated_calories INTEGER NOT NULL,
                target_muscle_groups TEXT NOT NULL,
                tags TEXT NOT NULL,
                exercise_count INTEGER NOT NULL DEFAULT 0,
                auto_generated INTEGER NOT NULL DEFAULT 0,
                created_by TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                times_completed INTEGER NOT NULL DEFAULT 0,
                last_completed TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to create workouts table").with_source(e))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_workouts_user
                ON workouts(user_id, generated_at)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to create workout index").with_source(e))?;

        Ok(())
    }
}
