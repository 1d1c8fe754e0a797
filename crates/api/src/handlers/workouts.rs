//! Handlers for the `/workouts` resource.
//!
//! Every handler is scoped to the authenticated caller: another user's
//! workout is indistinguishable from a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hiit_core::error::CoreError;
use hiit_core::types::DbId;
use hiit_db::models::workout::{CreateWorkout, PatchWorkout, WorkoutAggregate};
use hiit_db::repositories::{IntervalRepo, WorkoutRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn workout_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workout",
        id,
    })
}

/// GET /api/v1/workouts
#[utoipa::path(
    get,
    path = "/api/v1/workouts",
    responses(
        (status = 200, description = "Caller's workouts, newest first", body = [WorkoutAggregate]),
        (status = 401, description = "Missing or invalid token")
    ),
    tags = ["workouts"],
    operation_id = "listWorkouts"
)]
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<WorkoutAggregate>>> {
    let workouts = WorkoutRepo::list_by_owner(&state.pool, &auth.user_id).await?;
    Ok(Json(workouts))
}

/// POST /api/v1/workouts
#[utoipa::path(
    post,
    path = "/api/v1/workouts",
    request_body = CreateWorkout,
    responses(
        (status = 200, description = "Created workout as stored", body = WorkoutAggregate),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Payload failed validation")
    ),
    tags = ["workouts"],
    operation_id = "createWorkout"
)]
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateWorkout>,
) -> AppResult<Json<WorkoutAggregate>> {
    let workout = WorkoutRepo::create(&state.pool, &auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::InternalError("Created workout could not be re-read".into()))?;
    Ok(Json(workout))
}

/// GET /api/v1/workouts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/workouts/{id}",
    params(("id" = String, Path, description = "Workout id")),
    responses(
        (status = 200, description = "Workout with intervals and timers", body = WorkoutAggregate),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such workout for this caller")
    ),
    tags = ["workouts"],
    operation_id = "getWorkout"
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<WorkoutAggregate>> {
    let workout = WorkoutRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or_else(|| workout_not_found(id))?;
    Ok(Json(workout))
}

/// PATCH /api/v1/workouts/{id}
///
/// The workout and every interval named in the patch are checked up front,
/// so a bad reference is reported before anything is written.
#[utoipa::path(
    patch,
    path = "/api/v1/workouts/{id}",
    params(("id" = String, Path, description = "Workout id")),
    request_body = PatchWorkout,
    responses(
        (status = 200, description = "Workout after the patch", body = WorkoutAggregate),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Workout or interval not found"),
        (status = 409, description = "Patch collides with an existing order"),
        (status = 422, description = "Payload failed validation")
    ),
    tags = ["workouts"],
    operation_id = "patchWorkout"
)]
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PatchWorkout>,
) -> AppResult<Json<WorkoutAggregate>> {
    if !WorkoutRepo::exists_owned(&state.pool, id, &auth.user_id).await? {
        return Err(workout_not_found(id));
    }

    for interval in input.interval_patches() {
        IntervalRepo::find_in_workout(&state.pool, id, interval.id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Interval",
                id: interval.id,
            }))?;
    }

    let workout = WorkoutRepo::update(&state.pool, id, &auth.user_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Patched workout {id} could not be re-read"))
        })?;
    Ok(Json(workout))
}

/// DELETE /api/v1/workouts/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/workouts/{id}",
    params(("id" = String, Path, description = "Workout id")),
    responses(
        (status = 204, description = "Workout and its children removed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such workout for this caller")
    ),
    tags = ["workouts"],
    operation_id = "deleteWorkout"
)]
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    let deleted = WorkoutRepo::delete(&state.pool, id, &auth.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(workout_not_found(id))
    }
}
