pub mod health;
pub mod workouts;

use axum::routing::{get, post};
use axum::Router;

use crate::doc;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workouts                       list, create (auth required)
/// /workouts/complete              record a completion (POST)
/// /workouts/completed             completions in a date range (GET)
/// /workouts/{id}                  get, patch, delete
///
/// /user                           create from identity webhook (POST, signed)
///
/// /openapi.json                   OpenAPI document (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workouts", workouts::router())
        .route("/user", post(handlers::users::create))
        .route("/openapi.json", get(doc::openapi_json))
}
