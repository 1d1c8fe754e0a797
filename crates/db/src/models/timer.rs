//! Timer entity model and DTOs.
//!
//! A timer is one countdown step inside an interval; `order` fixes its
//! playback position among its siblings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};
use hiit_core::types::{DbId, Timestamp};

/// A row from the `timers` table.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    #[schema(value_type = String, format = Uuid)]
    pub interval_id: DbId,
    pub minutes: i32,
    pub seconds: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for one timer inside a create payload or a timer-set replacement.
///
/// The parent interval is implied by nesting; a client-supplied
/// `intervalId` is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTimer {
    /// Defaults to 0.
    #[validate(range(min = 0, max = 59))]
    pub minutes: Option<i32>,
    /// Defaults to 0.
    #[validate(range(min = 0, max = 59))]
    pub seconds: Option<i32>,
    #[serde(rename = "order")]
    #[validate(range(min = 0))]
    pub sort_order: i32,
}

/// Reject a timer list in which two timers share an `order`.
pub fn validate_unique_timer_orders(timers: &[CreateTimer]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(timers.len());
    if timers.iter().all(|t| seen.insert(t.sort_order)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("duplicate_timer_order");
        err.message = Some("timer order values must be unique within an interval".into());
        Err(err)
    }
}
