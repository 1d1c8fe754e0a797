//! Interval entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};
use hiit_core::types::{DbId, Timestamp};

use crate::models::timer::{validate_unique_timer_orders, CreateTimer, Timer};

/// A row from the `intervals` table.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub workout_id: DbId,
    pub name: Option<String>,
    pub repetitions: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// An interval with its timers sorted by `order`, as exposed by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntervalWithTimers {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub workout_id: DbId,
    pub name: Option<String>,
    pub repetitions: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
    pub timers: Vec<Timer>,
}

impl IntervalWithTimers {
    /// Attach `timers` to `interval`. Callers pass timers already sorted.
    pub fn new(interval: Interval, timers: Vec<Timer>) -> Self {
        Self {
            id: interval.id,
            workout_id: interval.workout_id,
            name: interval.name,
            repetitions: interval.repetitions,
            sort_order: interval.sort_order,
            created_at: interval.created_at,
            updated_at: interval.updated_at,
            timers,
        }
    }
}

/// DTO for one interval inside a workout create payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_interval"))]
pub struct CreateInterval {
    pub name: Option<String>,
    /// Defaults to 1.
    #[validate(range(min = 1))]
    pub repetitions: Option<i32>,
    #[serde(rename = "order")]
    #[validate(range(min = 0))]
    pub sort_order: i32,
    #[serde(default)]
    #[validate(nested)]
    pub timers: Vec<CreateTimer>,
}

fn validate_create_interval(input: &CreateInterval) -> Result<(), ValidationError> {
    validate_unique_timer_orders(&input.timers)
}

/// DTO for patching an existing interval of a workout.
///
/// Only non-`None` fields are applied. When `timers` is present the
/// interval's timer set is replaced wholesale: every existing timer is
/// deleted and the given list is inserted in order.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_patch_interval"))]
pub struct PatchInterval {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub repetitions: Option<i32>,
    #[serde(rename = "order")]
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[validate(nested)]
    pub timers: Option<Vec<CreateTimer>>,
}

fn validate_patch_interval(input: &PatchInterval) -> Result<(), ValidationError> {
    match &input.timers {
        Some(timers) => validate_unique_timer_orders(timers),
        None => Ok(()),
    }
}
