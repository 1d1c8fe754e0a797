pub mod completed;
pub mod users;
pub mod workouts;
