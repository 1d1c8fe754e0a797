//! Completed-workout log entries.
//!
//! A completion record is independent of the live workout: it may reference
//! a workout, but it survives that workout's deletion (the reference is
//! nulled out).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use hiit_core::dates::parse_completion_timestamp;
use hiit_core::error::CoreError;
use hiit_core::types::{DbId, Timestamp, UserId};

/// A row from the `completed_workouts` table.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct CompletedWorkout {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[serde(rename = "workoutId")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub workout_id: Option<DbId>,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "dateCompleted")]
    #[schema(value_type = String, format = DateTime)]
    pub date_completed: Timestamp,
    pub duration_hours: i32,
    pub duration_minutes: i32,
    pub duration_seconds: i32,
    #[serde(rename = "createdAt")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// Request body for recording a completed workout.
///
/// `dateCompleted` is a date string (RFC 3339, `YYYY-MM-DD`, or `M/D/YYYY`)
/// converted to a timestamp before storage. The owner is the authenticated
/// caller; a `userId` in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordCompletion {
    #[serde(rename = "workoutId")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub workout_id: Option<DbId>,
    #[serde(rename = "dateCompleted")]
    #[validate(length(min = 1))]
    pub date_completed: String,
    #[validate(range(min = 0))]
    pub duration_hours: i32,
    #[validate(range(min = 0))]
    pub duration_minutes: i32,
    #[validate(range(min = 0))]
    pub duration_seconds: i32,
}

/// A completion record with its date already parsed, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewCompletedWorkout {
    pub workout_id: Option<DbId>,
    pub date_completed: Timestamp,
    pub duration_hours: i32,
    pub duration_minutes: i32,
    pub duration_seconds: i32,
}

impl RecordCompletion {
    /// Parse `dateCompleted`; fails with [`CoreError::Validation`] on bad input.
    pub fn parse(&self) -> Result<NewCompletedWorkout, CoreError> {
        Ok(NewCompletedWorkout {
            workout_id: self.workout_id,
            date_completed: parse_completion_timestamp(&self.date_completed)?,
            duration_hours: self.duration_hours,
            duration_minutes: self.duration_minutes,
            duration_seconds: self.duration_seconds,
        })
    }
}
