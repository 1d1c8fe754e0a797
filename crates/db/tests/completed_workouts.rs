//! Integration tests for the completed-workout log.

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use hiit_core::dates::DayRange;
use hiit_core::types::Timestamp;
use hiit_db::models::completed_workout::NewCompletedWorkout;
use hiit_db::models::workout::CreateWorkout;
use hiit_db::repositories::{CompletedWorkoutRepo, WorkoutRepo};

fn completion(at: Timestamp) -> NewCompletedWorkout {
    NewCompletedWorkout {
        workout_id: None,
        date_completed: at,
        duration_hours: 0,
        duration_minutes: 20,
        duration_seconds: 0,
    }
}

fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_completion_round_trips(pool: PgPool) {
    let stored = CompletedWorkoutRepo::create(&pool, "user_a", &completion(at(2, 7)))
        .await
        .unwrap();

    assert_eq!(stored.user_id, "user_a");
    assert_eq!(stored.date_completed, at(2, 7));
    assert_eq!(stored.duration_minutes, 20);
    assert!(stored.workout_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_range_bounds_are_inclusive_by_day(pool: PgPool) {
    // 2026-02-28 12:00 and 2026-03-04 00:00 fall one day outside the range.
    let outside_before = Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap();
    for ts in [outside_before, at(1, 0), at(2, 12), at(3, 23), at(4, 0)] {
        CompletedWorkoutRepo::create(&pool, "user_a", &completion(ts))
            .await
            .unwrap();
    }

    let range = DayRange::from_bounds("3/1/2026", "3/3/2026").unwrap();
    let found = CompletedWorkoutRepo::list_in_range(&pool, "user_a", &range)
        .await
        .unwrap();

    let dates: Vec<Timestamp> = found.iter().map(|c| c.date_completed).collect();
    assert_eq!(dates, vec![at(1, 0), at(2, 12), at(3, 23)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_range_is_scoped_to_owner(pool: PgPool) {
    CompletedWorkoutRepo::create(&pool, "user_a", &completion(at(2, 8)))
        .await
        .unwrap();
    CompletedWorkoutRepo::create(&pool, "user_b", &completion(at(2, 9)))
        .await
        .unwrap();

    let range = DayRange::from_bounds("2026-03-01", "2026-03-31").unwrap();
    let found = CompletedWorkoutRepo::list_in_range(&pool, "user_b", &range)
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].user_id, "user_b");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_outlives_deleted_workout(pool: PgPool) {
    let workout = WorkoutRepo::create(
        &pool,
        "user_a",
        &CreateWorkout {
            name: "Short".to_string(),
            intervals: Vec::new(),
        },
    )
    .await
    .unwrap()
    .unwrap();

    let mut input = completion(at(5, 6));
    input.workout_id = Some(workout.id);
    let stored = CompletedWorkoutRepo::create(&pool, "user_a", &input)
        .await
        .unwrap();
    assert_eq!(stored.workout_id, Some(workout.id));

    assert!(WorkoutRepo::delete(&pool, workout.id, "user_a").await.unwrap());

    let range = DayRange::from_bounds("3/5/2026", "3/5/2026").unwrap();
    let found = CompletedWorkoutRepo::list_in_range(&pool, "user_a", &range)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stored.id);
    assert!(found[0].workout_id.is_none());
}
