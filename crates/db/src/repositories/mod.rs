//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-table writes open one
//! transaction and pass it to `*_inner` helpers that take `&mut PgConnection`.

pub mod completed_workout_repo;
pub mod interval_repo;
pub mod timer_repo;
pub mod user_repo;
pub mod workout_repo;

pub use completed_workout_repo::CompletedWorkoutRepo;
pub use interval_repo::IntervalRepo;
pub use timer_repo::TimerRepo;
pub use user_repo::UserRepo;
pub use workout_repo::WorkoutRepo;
