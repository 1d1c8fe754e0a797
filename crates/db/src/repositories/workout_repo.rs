//! Repository for the workout aggregate (`workouts` + `intervals` + `timers`).
//!
//! Writes open one transaction covering all three tables and re-read the
//! aggregate through the same reader before committing, so a caller never
//! sees a partially written or stale tree.

use sqlx::{PgConnection, PgPool};
use hiit_core::types::DbId;

use crate::models::interval::{Interval, PatchInterval};
use crate::models::timer::Timer;
use crate::models::workout::{assemble, CreateWorkout, PatchWorkout, Workout, WorkoutAggregate};
use crate::repositories::{interval_repo, timer_repo, IntervalRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Aggregate writer and reader for workouts.
pub struct WorkoutRepo;

impl WorkoutRepo {
    // ── Reader ───────────────────────────────────────────────────────

    /// List all workouts owned by `owner`, newest first, each fully assembled.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: &str,
    ) -> Result<Vec<WorkoutAggregate>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!(
            "SELECT {COLUMNS} FROM workouts WHERE user_id = $1 \
             ORDER BY created_at DESC, id"
        );
        let workouts = sqlx::query_as::<_, Workout>(&query)
            .bind(owner)
            .fetch_all(&mut *conn)
            .await?;
        Self::load_children_inner(&mut conn, workouts).await
    }

    /// Find one workout owned by `owner`.
    ///
    /// Returns `None` both when the workout does not exist and when another
    /// user owns it, so callers cannot discover foreign ids.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner: &str,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_owned_inner(&mut conn, id, owner).await
    }

    /// Whether a workout with `id` exists and belongs to `owner`.
    pub async fn exists_owned(pool: &PgPool, id: DbId, owner: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM workouts WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    async fn find_owned_inner(
        conn: &mut PgConnection,
        id: DbId,
        owner: &str,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE id = $1 AND user_id = $2");
        let workout = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(&mut *conn)
            .await?;

        match workout {
            Some(workout) => Ok(Self::load_children_inner(conn, vec![workout])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// Fetch intervals and timers for `workouts` with one query per table and
    /// assemble the nested trees.
    async fn load_children_inner(
        conn: &mut PgConnection,
        workouts: Vec<Workout>,
    ) -> Result<Vec<WorkoutAggregate>, sqlx::Error> {
        if workouts.is_empty() {
            return Ok(Vec::new());
        }

        let workout_ids: Vec<DbId> = workouts.iter().map(|w| w.id).collect();
        let query = format!(
            "SELECT {} FROM intervals WHERE workout_id = ANY($1) \
             ORDER BY workout_id, sort_order, created_at, id",
            interval_repo::COLUMNS
        );
        let intervals = sqlx::query_as::<_, Interval>(&query)
            .bind(&workout_ids)
            .fetch_all(&mut *conn)
            .await?;

        let interval_ids: Vec<DbId> = intervals.iter().map(|i| i.id).collect();
        let timers = if interval_ids.is_empty() {
            Vec::new()
        } else {
            let query = format!(
                "SELECT {} FROM timers WHERE interval_id = ANY($1) \
                 ORDER BY interval_id, sort_order, created_at, id",
                timer_repo::COLUMNS
            );
            sqlx::query_as::<_, Timer>(&query)
                .bind(&interval_ids)
                .fetch_all(&mut *conn)
                .await?
        };

        Ok(assemble(workouts, intervals, timers))
    }

    // ── Writer ───────────────────────────────────────────────────────

    /// Insert a workout with all its intervals and timers in one transaction.
    ///
    /// The owner row is created on first use. Returns the aggregate as
    /// re-read from storage; `None` means the re-read found nothing, which
    /// indicates a broken invariant rather than a missing resource.
    pub async fn create(
        pool: &PgPool,
        owner: &str,
        input: &CreateWorkout,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        UserRepo::ensure_inner(&mut tx, owner).await?;

        let (workout_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO workouts (name, user_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.name)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await?;

        for interval in &input.intervals {
            IntervalRepo::insert_inner(&mut tx, workout_id, interval).await?;
        }

        let aggregate = Self::find_owned_inner(&mut tx, workout_id, owner).await?;
        tx.commit().await?;

        tracing::info!(
            workout_id = %workout_id,
            user_id = %owner,
            intervals = input.intervals.len(),
            "Workout created"
        );
        Ok(aggregate)
    }

    /// Apply a workout patch in one transaction.
    ///
    /// Updates the name (if given) and bumps `updated_at`, then applies each
    /// interval patch, fully replacing timer sets where provided. Intervals
    /// not named in the patch are untouched. Callers verify existence first;
    /// a row that disappeared concurrently surfaces as `RowNotFound`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: &str,
        input: &PatchWorkout,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE workouts SET name = COALESCE($3, name), updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id",
        )
        .bind(id)
        .bind(owner)
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;

        for patch in input.interval_patches() {
            IntervalRepo::apply_patch_inner(&mut tx, id, patch).await?;
        }

        let aggregate = Self::find_owned_inner(&mut tx, id, owner).await?;
        tx.commit().await?;

        tracing::info!(
            workout_id = %id,
            user_id = %owner,
            intervals_patched = input.interval_patches().len(),
            "Workout updated"
        );
        Ok(aggregate)
    }

    /// Update one interval and full-replace its timers in one transaction,
    /// returning the owning workout re-read from storage.
    pub async fn replace_interval_timers(
        pool: &PgPool,
        workout_id: DbId,
        owner: &str,
        input: &PatchInterval,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let patch = PatchWorkout {
            name: None,
            intervals: Some(vec![input.clone()]),
        };
        Self::update(pool, workout_id, owner, &patch).await
    }

    /// Delete a workout and everything beneath it in one transaction.
    ///
    /// Children go first: each interval's timers, then the interval, then
    /// the workout row. Returns `false` if no workout with `id` is owned by
    /// `owner`.
    pub async fn delete(pool: &PgPool, id: DbId, owner: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(aggregate) = Self::find_owned_inner(&mut tx, id, owner).await? else {
            return Ok(false);
        };

        for interval in &aggregate.intervals {
            IntervalRepo::delete_inner(&mut tx, interval.id).await?;
        }

        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            workout_id = %id,
            user_id = %owner,
            intervals = aggregate.intervals.len(),
            timers = aggregate.timer_count(),
            "Workout deleted"
        );
        Ok(result.rows_affected() > 0)
    }
}
