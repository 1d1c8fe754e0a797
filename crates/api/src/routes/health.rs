//! `GET /health`, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// How `POST /user` treats deliveries under the running configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRegistration {
    /// Signed identity-provider webhooks only.
    Signed,
    /// Raw `{id}` bodies, for local development.
    Unsigned,
    /// No secret and no opt-in: every delivery is refused.
    Disabled,
}

impl UserRegistration {
    fn from_state(state: &AppState) -> Self {
        match (&state.webhook_verifier, state.config.allow_unsigned_users) {
            (Some(_), _) => Self::Signed,
            (None, true) => Self::Unsigned,
            (None, false) => Self::Disabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub user_registration: UserRegistration,
}

/// Answers 503 while the database is down so a load balancer stops routing
/// workout traffic here; the body still describes the instance.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match hiit_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        user_registration: UserRegistration::from_state(&state),
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
