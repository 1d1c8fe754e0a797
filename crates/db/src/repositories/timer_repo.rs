//! Repository for the `timers` table.
//!
//! Timers are only written as part of their interval's aggregate, so every
//! write helper runs inside a caller-owned transaction.

use sqlx::PgConnection;
use hiit_core::types::DbId;

use crate::models::timer::CreateTimer;

pub(crate) const COLUMNS: &str =
    "id, interval_id, minutes, seconds, sort_order, created_at, updated_at";

pub struct TimerRepo;

impl TimerRepo {
    /// Insert `timers` under `interval_id`, in slice order.
    pub(crate) async fn insert_all_inner(
        conn: &mut PgConnection,
        interval_id: DbId,
        timers: &[CreateTimer],
    ) -> Result<(), sqlx::Error> {
        for timer in timers {
            sqlx::query(
                "INSERT INTO timers (interval_id, minutes, seconds, sort_order) \
                 VALUES ($1, COALESCE($2, 0), COALESCE($3, 0), $4)",
            )
            .bind(interval_id)
            .bind(timer.minutes)
            .bind(timer.seconds)
            .bind(timer.sort_order)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Delete every timer of an interval. Returns the number of rows removed.
    pub(crate) async fn delete_by_interval_inner(
        conn: &mut PgConnection,
        interval_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timers WHERE interval_id = $1")
            .bind(interval_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Full-replace an interval's timer set: delete all, then insert `timers`.
    ///
    /// No reconciliation by id; every previous timer row is destroyed.
    pub(crate) async fn replace_all_inner(
        conn: &mut PgConnection,
        interval_id: DbId,
        timers: &[CreateTimer],
    ) -> Result<(), sqlx::Error> {
        let removed = Self::delete_by_interval_inner(&mut *conn, interval_id).await?;
        Self::insert_all_inner(&mut *conn, interval_id, timers).await?;
        tracing::debug!(
            interval_id = %interval_id,
            removed,
            inserted = timers.len(),
            "Replaced interval timers"
        );
        Ok(())
    }
}
