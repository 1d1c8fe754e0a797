//! Route definitions for the `/workouts` resource and the completion log.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{completed, workouts};
use crate::state::AppState;

/// Routes mounted at `/workouts`.
///
/// Static segments win over `/{id}` in axum's matcher, so `complete` and
/// `completed` are never parsed as workout ids.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// POST   /complete      -> completed::record
/// GET    /completed     -> completed::list_range
/// GET    /{id}          -> get_by_id
/// PATCH  /{id}          -> patch
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workouts::list).post(workouts::create))
        .route("/complete", post(completed::record))
        .route("/completed", get(completed::list_range))
        .route(
            "/{id}",
            get(workouts::get_by_id)
                .patch(workouts::patch)
                .delete(workouts::delete),
        )
}
