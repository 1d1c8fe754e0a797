//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every `/api/v1` path and the request/response schemas
//! behind them, and declares the Bearer JWT scheme the workout routes use.
//! The document is served as JSON at `GET /api/v1/openapi.json`.

use axum::Json;
use hiit_db::models::completed_workout::{CompletedWorkout, RecordCompletion};
use hiit_db::models::interval::{CreateInterval, IntervalWithTimers, PatchInterval};
use hiit_db::models::timer::{CreateTimer, Timer};
use hiit_db::models::user::{CreateUser, User};
use hiit_db::models::workout::{CreateWorkout, PatchWorkout, WorkoutAggregate};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme registered by [`SecurityAddon`].
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the Bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 access token; `sub` is the owner id."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HIIT workout API",
        description = "Workouts with ordered intervals and timers, plus a completed-workout log."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::handlers::workouts::list,
        crate::handlers::workouts::create,
        crate::handlers::workouts::get_by_id,
        crate::handlers::workouts::patch,
        crate::handlers::workouts::delete,
        crate::handlers::completed::record,
        crate::handlers::completed::list_range,
        crate::handlers::users::create,
    ),
    components(schemas(
        WorkoutAggregate,
        IntervalWithTimers,
        Timer,
        CreateWorkout,
        CreateInterval,
        CreateTimer,
        PatchWorkout,
        PatchInterval,
        CompletedWorkout,
        RecordCompletion,
        User,
        CreateUser,
    )),
    tags(
        (name = "workouts", description = "Workout aggregates owned by the caller"),
        (name = "completed", description = "Completed-workout log"),
        (name = "users", description = "Identity-provider user sync")
    )
)]
pub struct ApiDoc;

/// GET /api/v1/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
