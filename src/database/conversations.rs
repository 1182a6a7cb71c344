// ABOUTME: Conversation persistence with ownership-guarded message appends
// ABOUTME: Manages conversation rows and their ordered message transcripts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Conversation Manager
//!
//! Transcripts are append-only: messages are never edited or deleted, and
//! retrieval returns them in append order. A conversation id presented by
//! a different user is treated as unknown and a fresh conversation is
//! started, so transcripts never leak across users.

use sqlx::{Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::llm::MessageRole;
use crate::models::ConversationMessage;

/// Conversation persistence operations
pub struct ConversationManager {
    pool: SqlitePool,
}

impl ConversationManager {
    /// Create a manager over the shared pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve a conversation id for a user, creating one when needed
    ///
    /// An absent, unknown, or foreign id starts a new conversation.
    ///
    /// # Errors
    ///
    /// Returns a database error when the lookup or insert fails.
    pub async fn get_or_create(
        &self,
        user_id: &str,
        conversation_id: Option<&str>,
    ) -> AppResult<String> {
        if let Some(id) = conversation_id {
            let owned: Option<(String,)> =
                sqlx::query_as("SELECT id FROM conversations WHERE id = ? AND user_id = ?")
                    .bind(id)
                    .bind(user_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::database("conversation lookup failed").with_source(e)
                    })?;

            if let Some((id,)) = owned {
                return Ok(id);
            }
            warn!("conversation {id} not found for user, starting a new one");
        }

        self.create(user_id).await
    }

    /// Create a new conversation for a user
    ///
    /// # Errors
    ///
    /// Returns a database error when the insert fails.
    pub async fn create(&self, user_id: &str) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO conversations (id, user_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to create conversation").with_source(e))?;

        Ok(id)
    }

    /// Append a message to a conversation the user owns
    ///
    /// The insert is guarded by an ownership check in the same statement,
    /// so a foreign conversation id appends nothing.
    ///
    /// # Errors
    ///
    /// Returns a database error when the insert fails.
    pub async fn add_message(
        &self,
        conversation_id: &str,
        user_id: &str,
        message: &ConversationMessage,
    ) -> AppResult<()> {
        let id = Uuid::new_v4().to_string();

        let result = sqlx::query(
            r"
            INSERT INTO conversation_messages (id, conversation_id, role, content, created_at)
            SELECT ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM conversations WHERE id = ? AND user_id = ?)
            ",
        )
        .bind(&id)
        .bind(conversation_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(&message.timestamp)
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to append message").with_source(e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("conversation"));
        }

        sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(conversation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("failed to touch conversation").with_source(e))?;

        Ok(())
    }

    /// Fetch a conversation's transcript in append order
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn messages(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<ConversationMessage>> {
        let rows = sqlx::query(
            r"
            SELECT m.role, m.content, m.created_at
            FROM conversation_messages m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE m.conversation_id = ? AND c.user_id = ?
            ORDER BY m.created_at ASC, m.rowid ASC
            ",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to load transcript").with_source(e))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let role: String = row
                .try_get("role")
                .map_err(|e| AppError::database("transcript row missing role").with_source(e))?;
            let content: String = row
                .try_get("content")
                .map_err(|e| AppError::database("transcript row missing content").with_source(e))?;
            let timestamp: String = row.try_get("created_at").map_err(|e| {
                AppError::database("transcript row missing timestamp").with_source(e)
            })?;

            messages.push(ConversationMessage {
                role: MessageRole::from_str_or_default(&role),
                content,
                timestamp,
            });
        }
        Ok(messages)
    }

    /// Find the user's most recently updated conversation, if any
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn latest_for_user(&self, user_id: &str) -> AppResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT id FROM conversations WHERE user_id = ? ORDER BY updated_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("latest conversation lookup failed").with_source(e))?;

        Ok(row.map(|(id,)| id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    async fn test_database() -> Database {
        Database::connect("sqlite::memory:")
            .await
            .unwrap_or_else(|e| panic!("in-memory database failed: {e}"))
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_owned_conversation() {
        let db = test_database().await;
        let conversations = db.conversations();

        let first = conversations.get_or_create("u1", None).await.unwrap();
        let second = conversations
            .get_or_create("u1", Some(&first))
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_foreign_conversation_id_starts_fresh() {
        let db = test_database().await;
        let conversations = db.conversations();

        let owned = conversations.get_or_create("u1", None).await.unwrap();
        let other = conversations
            .get_or_create("u2", Some(&owned))
            .await
            .unwrap();
        assert_ne!(owned, other);
    }

    #[tokio::test]
    async fn test_transcript_preserves_append_order() {
        let db = test_database().await;
        let conversations = db.conversations();
        let id = conversations.get_or_create("u1", None).await.unwrap();

        for (role, content) in [
            (MessageRole::User, "hi"),
            (MessageRole::Assistant, "hello"),
            (MessageRole::User, "make me a workout"),
        ] {
            conversations
                .add_message(&id, "u1", &ConversationMessage::now(role, content))
                .await
                .unwrap();
        }

        let transcript = conversations.messages(&id, "u1").await.unwrap();
        let contents: Vec<&str> = transcript.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "hello", "make me a workout"]);
    }

    #[tokio::test]
    async fn test_append_to_foreign_conversation_rejected() {
        let db = test_database().await;
        let conversations = db.conversations();
        let id = conversations.get_or_create("u1", None).await.unwrap();

        let message = ConversationMessage::now(MessageRole::User, "intrusion");
        let err = conversations.add_message(&id, "u2", &message).await;
        assert!(err.is_err());

        let transcript = conversations.messages(&id, "u1").await.unwrap();
        assert!(transcript.is_empty());
    }

    #[tokio::test]
    async fn test_latest_for_user() {
        let db = test_database().await;
        let conversations = db.conversations();

        assert!(conversations.latest_for_user("u1").await.unwrap().is_none());
        let id = conversations.get_or_create("u1", None).await.unwrap();
        assert_eq!(
            conversations.latest_for_user("u1").await.unwrap(),
            Some(id)
        );
    }
}
