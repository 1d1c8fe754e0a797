//! Extractors that turn bad requests into [`AppError`] JSON responses
//! instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use hiit_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its [`Validate`] rules.
///
/// Malformed JSON, a wrong content type or mistyped fields become
/// [`AppError::InvalidPayload`]; rule violations become
/// [`AppError::Validation`]. Both render as 422, so handlers only ever see
/// well-formed input.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Single `{id}` path segment parsed as a [`DbId`].
///
/// Ids are opaque to callers, so a segment that is not a UUID is reported
/// the same way as a well-formed id that matches no row: 404.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InternalError(rejection.body_text()))?;
        raw.parse::<DbId>().map(Self).map_err(|_| {
            tracing::debug!(id = %raw, "Path id is not a UUID");
            AppError::NotFound(format!("No resource with id {raw}"))
        })
    }
}
