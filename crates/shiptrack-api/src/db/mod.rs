//! # Database Layer
//!
//! Postgres persistence via `sqlx`. The database is optional: when
//! `DATABASE_URL` is unset the service runs purely in memory and all
//! functions here are simply never called. When it is set, every store
//! mutation writes through here after the in-memory commit.

pub mod shipments;
pub mod statuses;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialise the database connection pool from `DATABASE_URL` and run
/// pending migrations. Returns `None` when no database is configured.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        tracing::warn!("DATABASE_URL not set, running with in-memory state only");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("database pool initialised and migrations applied");
    Ok(Some(pool))
}

/// Whether an sqlx error is a Postgres unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
