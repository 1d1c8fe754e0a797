//! Repository for the `users` table.

use sqlx::{PgConnection, PgPool};

use crate::models::user::User;

const COLUMNS: &str = "id, created_at, updated_at";

/// Users are never mutated or deleted here; they are only ensured to exist.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user if absent and return the stored row.
    ///
    /// Idempotent: an existing user is returned unchanged.
    pub async fn ensure(pool: &PgPool, id: &str) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let user = Self::ensure_inner(&mut tx, id).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Ensure the user row exists within an existing transaction.
    pub(crate) async fn ensure_inner(conn: &mut PgConnection, id: &str) -> Result<User, sqlx::Error> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
