// ABOUTME: Workout persistence with JSON-encoded plan columns
// ABOUTME: Stores enriched workouts and tracks completion analytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Workout Manager
//!
//! Workouts are stored one row per record with the structured parts
//! (segments, muscle groups, tags) JSON-encoded in text columns. Inserts
//! from the generation pipeline report [`PersistenceFailure`] so the
//! orchestrator can distinguish a lost workout from a generic query error.
//!
//! [`PersistenceFailure`]: crate::errors::ErrorCode::PersistenceFailure

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    Difficulty, EnrichedWorkout, SegmentGroups, WorkoutAnalytics, WorkoutRecord,
};

/// Workout persistence operations
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a manager over the shared pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist an enriched workout, assigning it an id
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailure` when the write is rejected.
    pub async fn insert(
        &self,
        user_id: &str,
        workout: &EnrichedWorkout,
    ) -> AppResult<WorkoutRecord> {
        let id = Uuid::new_v4().to_string();

        let exercises = serde_json::to_string(&workout.exercises)
            .map_err(|e| AppError::persistence("failed to encode segments").with_source(e))?;
        let muscle_groups = serde_json::to_string(&workout.metadata.target_muscle_groups)
            .map_err(|e| AppError::persistence("failed to encode muscle groups").with_source(e))?;
        let tags = serde_json::to_string(&workout.metadata.tags)
            .map_err(|e| AppError::persistence("failed to encode tags").with_source(e))?;

        sqlx::query(
            r"
            INSERT INTO workouts (
                id, user_id, name, description, duration_minutes, difficulty,
                exercises, estimated_calories, target_muscle_groups, tags,
                exercise_count, auto_generated, created_by, generated_at,
                times_completed, last_completed
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, NULL)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(i64::from(workout.duration_minutes))
        .bind(workout.difficulty.as_str())
        .bind(&exercises)
        .bind(i64::from(workout.metadata.estimated_calories))
        .bind(&muscle_groups)
        .bind(&tags)
        .bind(i64::try_from(workout.metadata.exercise_count).unwrap_or(i64::MAX))
        .bind(workout.auto_generated)
        .bind(&workout.created_by)
        .bind(&workout.generated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::persistence("workout insert rejected").with_source(e))?;

        Ok(WorkoutRecord {
            id,
            user_id: user_id.to_owned(),
            name: workout.name.clone(),
            description: workout.description.clone(),
            duration_minutes: workout.duration_minutes,
            difficulty: workout.difficulty,
            exercises: workout.exercises.clone(),
            estimated_calories: workout.metadata.estimated_calories,
            target_muscle_groups: workout.metadata.target_muscle_groups.clone(),
            tags: workout.metadata.tags.clone(),
            exercise_count: workout.metadata.exercise_count,
            auto_generated: workout.auto_generated,
            created_by: workout.created_by.clone(),
            generated_at: workout.generated_at.clone(),
            analytics: WorkoutAnalytics::default(),
        })
    }

    /// List a user's workouts, most recently generated first
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<WorkoutRecord>> {
        let rows = sqlx::query(
            "SELECT * FROM workouts WHERE user_id = ? ORDER BY generated_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to list workouts").with_source(e))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    /// Fetch a single workout the user owns
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn get(&self, id: &str, user_id: &str) -> AppResult<Option<WorkoutRecord>> {
        let row = sqlx::query("SELECT * FROM workouts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("failed to fetch workout").with_source(e))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    /// Delete a workout the user owns, reporting whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns a database error when the delete fails.
    pub async fn delete(&self, id: &str, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("failed to delete workout").with_source(e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Record one completion of a workout and return the updated record
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the workout does not exist for the
    /// user, or a database error when the update fails.
    pub async fn record_completion(&self, id: &str, user_id: &str) -> AppResult<WorkoutRecord> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            UPDATE workouts
            SET times_completed = times_completed + 1, last_completed = ?
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("failed to record completion").with_source(e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("workout"));
        }

        self.get(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("workout"))
    }

    fn record_from_row(row: &SqliteRow) -> AppResult<WorkoutRecord> {
        let difficulty: String = Self::column(row, "difficulty")?;
        let exercises_json: String = Self::column(row, "exercises")?;
        let muscle_groups_json: String = Self::column(row, "target_muscle_groups")?;
        let tags_json: String = Self::column(row, "tags")?;
        let duration_minutes: i64 = Self::column(row, "duration_minutes")?;
        let estimated_calories: i64 = Self::column(row, "estimated_calories")?;
        let exercise_count: i64 = Self::column(row, "exercise_count")?;

        let exercises: SegmentGroups = serde_json::from_str(&exercises_json)
            .map_err(|e| AppError::database("stored segments are corrupt").with_source(e))?;
        let target_muscle_groups: BTreeSet<String> = serde_json::from_str(&muscle_groups_json)
            .map_err(|e| AppError::database("stored muscle groups are corrupt").with_source(e))?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|e| AppError::database("stored tags are corrupt").with_source(e))?;

        Ok(WorkoutRecord {
            id: Self::column(row, "id")?,
            user_id: Self::column(row, "user_id")?,
            name: Self::column(row, "name")?,
            description: Self::column(row, "description")?,
            duration_minutes: u32::try_from(duration_minutes).unwrap_or(0),
            difficulty: Difficulty::from_str_or_default(&difficulty),
            exercises,
            estimated_calories: u32::try_from(estimated_calories).unwrap_or(0),
            target_muscle_groups,
            tags,
            exercise_count: usize::try_from(exercise_count).unwrap_or(0),
            auto_generated: Self::column(row, "auto_generated")?,
            created_by: Self::column(row, "created_by")?,
            generated_at: Self::column(row, "generated_at")?,
            analytics: WorkoutAnalytics {
                times_completed: Self::column(row, "times_completed")?,
                last_completed: Self::column(row, "last_completed")?,
            },
        })
    }

    fn column<'r, T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>>(
        row: &'r SqliteRow,
        name: &str,
    ) -> AppResult<T> {
        row.try_get(name)
            .map_err(|e| AppError::database(format!("missing column {name}")).with_source(e))
    }
}
