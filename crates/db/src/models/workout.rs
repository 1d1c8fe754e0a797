//! Workout entity model, the nested workout aggregate, and DTOs.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};
use hiit_core::types::{DbId, Timestamp, UserId};

use crate::models::interval::{CreateInterval, Interval, IntervalWithTimers, PatchInterval};
use crate::models::timer::Timer;

/// A row from the `workouts` table.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    pub name: String,
    pub user_id: UserId,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// A workout with its intervals (sorted by `order`), each carrying its
/// timers (sorted by `order`). This is the unit every workout endpoint
/// returns.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutAggregate {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    pub name: String,
    pub user_id: UserId,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
    pub intervals: Vec<IntervalWithTimers>,
}

impl WorkoutAggregate {
    pub fn new(workout: Workout, intervals: Vec<IntervalWithTimers>) -> Self {
        Self {
            id: workout.id,
            name: workout.name,
            user_id: workout.user_id,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
            intervals,
        }
    }

    /// Total number of timers across all intervals.
    pub fn timer_count(&self) -> usize {
        self.intervals.iter().map(|i| i.timers.len()).sum()
    }
}

/// Build aggregates from flat rows.
///
/// Workouts keep the order they are given in. Intervals and timers are
/// sorted by `(order, created_at, id)` regardless of input order, so ties in
/// `order` still resolve deterministically. Rows whose parent is absent
/// from the input are dropped.
pub fn assemble(
    workouts: Vec<Workout>,
    intervals: Vec<Interval>,
    timers: Vec<Timer>,
) -> Vec<WorkoutAggregate> {
    let mut timers_by_interval: HashMap<DbId, Vec<Timer>> = HashMap::new();
    for timer in timers {
        timers_by_interval
            .entry(timer.interval_id)
            .or_default()
            .push(timer);
    }

    let mut intervals_by_workout: HashMap<DbId, Vec<IntervalWithTimers>> = HashMap::new();
    for interval in intervals {
        let mut children = timers_by_interval.remove(&interval.id).unwrap_or_default();
        children.sort_by_key(|t| (t.sort_order, t.created_at, t.id));
        intervals_by_workout
            .entry(interval.workout_id)
            .or_default()
            .push(IntervalWithTimers::new(interval, children));
    }

    workouts
        .into_iter()
        .map(|workout| {
            let mut children = intervals_by_workout.remove(&workout.id).unwrap_or_default();
            children.sort_by_key(|i| (i.sort_order, i.created_at, i.id));
            WorkoutAggregate::new(workout, children)
        })
        .collect()
}

/// DTO for creating a workout together with its intervals and timers.
///
/// The owner is always the authenticated caller; a `userId` in the body is
/// ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_workout"))]
pub struct CreateWorkout {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub intervals: Vec<CreateInterval>,
}

fn validate_create_workout(input: &CreateWorkout) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(input.intervals.len());
    if input.intervals.iter().all(|i| seen.insert(i.sort_order)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("duplicate_interval_order");
        err.message = Some("interval order values must be unique within a workout".into());
        Err(err)
    }
}

/// DTO for patching a workout. All fields are optional.
///
/// Intervals not listed are left untouched.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_patch_workout"))]
pub struct PatchWorkout {
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    #[validate(nested)]
    pub intervals: Option<Vec<PatchInterval>>,
}

impl PatchWorkout {
    pub fn interval_patches(&self) -> &[PatchInterval] {
        self.intervals.as_deref().unwrap_or_default()
    }
}

fn validate_patch_workout(input: &PatchWorkout) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if input.interval_patches().iter().all(|i| seen.insert(i.id)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("duplicate_interval_id");
        err.message = Some("an interval may appear only once per patch".into());
        Err(err)
    }
}
