//! Handlers for the completed-workout log.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use hiit_core::dates::DayRange;
use hiit_core::error::CoreError;
use hiit_db::models::completed_workout::{CompletedWorkout, RecordCompletion};
use hiit_db::repositories::{CompletedWorkoutRepo, WorkoutRepo};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query string for `GET /workouts/completed`. Both bounds are calendar
/// dates (`M/D/YYYY` or `YYYY-MM-DD`) and both days are included.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompletedRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// POST /api/v1/workouts/complete
#[utoipa::path(
    post,
    path = "/api/v1/workouts/complete",
    request_body = RecordCompletion,
    responses(
        (status = 200, description = "Stored completion record", body = CompletedWorkout),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Referenced workout not found"),
        (status = 422, description = "Payload failed validation")
    ),
    tags = ["completed"],
    operation_id = "recordCompletion"
)]
pub async fn record(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<RecordCompletion>,
) -> AppResult<Json<CompletedWorkout>> {
    let completion = input.parse()?;

    if let Some(workout_id) = completion.workout_id {
        if !WorkoutRepo::exists_owned(&state.pool, workout_id, &auth.user_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Workout",
                id: workout_id,
            }));
        }
    }

    let stored = CompletedWorkoutRepo::create(&state.pool, &auth.user_id, &completion).await?;
    Ok(Json(stored))
}

/// GET /api/v1/workouts/completed?startDate=&endDate=
#[utoipa::path(
    get,
    path = "/api/v1/workouts/completed",
    params(CompletedRangeQuery),
    responses(
        (status = 200, description = "Completions in range, oldest first", body = [CompletedWorkout]),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Missing, unparseable or inverted dates")
    ),
    tags = ["completed"],
    operation_id = "listCompletions"
)]
pub async fn list_range(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<CompletedRangeQuery>, QueryRejection>,
) -> AppResult<Json<Vec<CompletedWorkout>>> {
    let Query(params) = query.map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;
    let range = DayRange::from_bounds(&params.start_date, &params.end_date)?;

    let records = CompletedWorkoutRepo::list_in_range(&state.pool, &auth.user_id, &range).await?;
    tracing::debug!(
        user_id = %auth.user_id,
        count = records.len(),
        "Listed completions in range"
    );
    Ok(Json(records))
}
