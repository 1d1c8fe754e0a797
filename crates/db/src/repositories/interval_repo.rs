//! Repository for the `intervals` table.

use sqlx::{PgConnection, PgPool};
use hiit_core::types::DbId;

use crate::models::interval::{CreateInterval, Interval, PatchInterval};
use crate::repositories::TimerRepo;

pub(crate) const COLUMNS: &str =
    "id, workout_id, name, repetitions, sort_order, created_at, updated_at";

pub struct IntervalRepo;

impl IntervalRepo {
    /// Find an interval only if it belongs to `workout_id`.
    pub async fn find_in_workout(
        pool: &PgPool,
        workout_id: DbId,
        id: DbId,
    ) -> Result<Option<Interval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM intervals WHERE id = $1 AND workout_id = $2");
        sqlx::query_as::<_, Interval>(&query)
            .bind(id)
            .bind(workout_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an interval and its timers. Returns the new interval id.
    ///
    /// If `repetitions` is `None`, defaults to 1.
    pub(crate) async fn insert_inner(
        conn: &mut PgConnection,
        workout_id: DbId,
        input: &CreateInterval,
    ) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO intervals (workout_id, name, repetitions, sort_order) \
             VALUES ($1, $2, COALESCE($3, 1), $4) \
             RETURNING id",
        )
        .bind(workout_id)
        .bind(&input.name)
        .bind(input.repetitions)
        .bind(input.sort_order)
        .fetch_one(&mut *conn)
        .await?;

        TimerRepo::insert_all_inner(&mut *conn, id, &input.timers).await?;
        Ok(id)
    }

    /// Apply a patch to an interval of `workout_id`, replacing its timers
    /// when the patch carries a timer list.
    ///
    /// Fails with `RowNotFound` if the interval vanished since the caller
    /// checked for it.
    pub(crate) async fn apply_patch_inner(
        conn: &mut PgConnection,
        workout_id: DbId,
        input: &PatchInterval,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE intervals SET \
                name = COALESCE($3, name), \
                repetitions = COALESCE($4, repetitions), \
                sort_order = COALESCE($5, sort_order), \
                updated_at = NOW() \
             WHERE id = $1 AND workout_id = $2 \
             RETURNING id",
        )
        .bind(input.id)
        .bind(workout_id)
        .bind(&input.name)
        .bind(input.repetitions)
        .bind(input.sort_order)
        .fetch_one(&mut *conn)
        .await?;

        if let Some(timers) = &input.timers {
            TimerRepo::replace_all_inner(&mut *conn, input.id, timers).await?;
        }
        Ok(())
    }

    /// Delete an interval after removing its timers.
    pub(crate) async fn delete_inner(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        TimerRepo::delete_by_interval_inner(&mut *conn, id).await?;
        sqlx::query("DELETE FROM intervals WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
