//! Status catalog seeding.

use sqlx::postgres::PgPool;

use shiptrack_state::ShipmentStatus;

/// Insert any missing catalog rows. Idempotent: rows that already
/// exist are left untouched, so this is safe to run on every startup.
pub async fn ensure_seeded(pool: &PgPool) -> Result<(), sqlx::Error> {
    for status in ShipmentStatus::ALL {
        sqlx::query("INSERT INTO statuses (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(status.code())
            .bind(status.name())
            .execute(pool)
            .await?;
    }
    tracing::info!(count = ShipmentStatus::ALL.len(), "status catalog seeded");
    Ok(())
}
