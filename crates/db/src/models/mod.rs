//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs for inserts and patches
//!
//! The workout aggregate (workout -> intervals -> timers) is assembled from
//! three row types; see [`workout::WorkoutAggregate`].

pub mod completed_workout;
pub mod interval;
pub mod timer;
pub mod user;
pub mod workout;
