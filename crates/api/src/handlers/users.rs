//! Handler for `POST /user`, fed by the identity provider's webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use hiit_core::types::UserId;
use hiit_core::webhook::{headers, IdentityEvent, SignatureHeaders, WebhookError};
use hiit_db::models::user::{CreateUser, User};
use hiit_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn header_str<'a>(map: &'a HeaderMap, name: &str) -> Option<&'a str> {
    map.get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

fn signature_headers(map: &HeaderMap) -> Result<SignatureHeaders<'_>, WebhookError> {
    match (
        header_str(map, headers::ID),
        header_str(map, headers::TIMESTAMP),
        header_str(map, headers::SIGNATURE),
    ) {
        (Some(msg_id), Some(timestamp), Some(signature)) => Ok(SignatureHeaders {
            msg_id,
            timestamp,
            signature,
        }),
        _ => Err(WebhookError::MissingHeaders),
    }
}

/// Work out which user id a delivery is asking us to create.
fn requested_user_id(state: &AppState, map: &HeaderMap, body: &[u8]) -> AppResult<UserId> {
    let Some(verifier) = &state.webhook_verifier else {
        if !state.config.allow_unsigned_users {
            return Err(AppError::BadRequest(
                "User registration requires a signed webhook delivery".into(),
            ));
        }
        let input: CreateUser =
            serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))?;
        input.validate()?;
        return Ok(input.id);
    };

    verifier.verify(signature_headers(map)?, body, chrono::Utc::now())?;
    let event = IdentityEvent::parse(body)?;
    if event.data.id.trim().is_empty() {
        return Err(AppError::BadRequest("Webhook event carries no user id".into()));
    }
    Ok(event.data.id)
}

/// POST /api/v1/user
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body(content = CreateUser, description = "Signed identity event, or a raw `{id}` body when unsigned users are allowed"),
    responses(
        (status = 200, description = "User as stored", body = User),
        (status = 400, description = "Missing or invalid webhook signature, or signing not configured"),
        (status = 422, description = "Unsigned body failed validation")
    ),
    tags = ["users"],
    operation_id = "createUser",
    security(())
)]
pub async fn create(
    State(state): State<AppState>,
    map: HeaderMap,
    body: Bytes,
) -> AppResult<Json<User>> {
    let user_id = requested_user_id(&state, &map, &body)?;
    let user = UserRepo::ensure(&state.pool, &user_id).await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(user))
}
