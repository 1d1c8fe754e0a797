//! Repository for the `completed_workouts` table.

use sqlx::PgPool;
use hiit_core::dates::DayRange;

use crate::models::completed_workout::{CompletedWorkout, NewCompletedWorkout};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, workout_id, user_id, date_completed, duration_hours, \
    duration_minutes, duration_seconds, created_at, updated_at";

/// Append-only log of completed workouts.
pub struct CompletedWorkoutRepo;

impl CompletedWorkoutRepo {
    /// Record a completion for `owner`, creating the owner row on first use.
    pub async fn create(
        pool: &PgPool,
        owner: &str,
        input: &NewCompletedWorkout,
    ) -> Result<CompletedWorkout, sqlx::Error> {
        let mut tx = pool.begin().await?;

        UserRepo::ensure_inner(&mut tx, owner).await?;

        let query = format!(
            "INSERT INTO completed_workouts \
                (workout_id, user_id, date_completed, duration_hours, duration_minutes, duration_seconds) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, CompletedWorkout>(&query)
            .bind(input.workout_id)
            .bind(owner)
            .bind(input.date_completed)
            .bind(input.duration_hours)
            .bind(input.duration_minutes)
            .bind(input.duration_seconds)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            completed_id = %record.id,
            user_id = %owner,
            date_completed = %record.date_completed,
            "Workout completion recorded"
        );
        Ok(record)
    }

    /// List `owner`'s completions inside `range`, oldest first.
    pub async fn list_in_range(
        pool: &PgPool,
        owner: &str,
        range: &DayRange,
    ) -> Result<Vec<CompletedWorkout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM completed_workouts \
             WHERE user_id = $1 AND date_completed >= $2 AND date_completed < $3 \
             ORDER BY date_completed, id"
        );
        sqlx::query_as::<_, CompletedWorkout>(&query)
            .bind(owner)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await
    }
}
