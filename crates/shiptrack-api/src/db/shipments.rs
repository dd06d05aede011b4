//! Shipment row persistence.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use uuid::Uuid;

use shiptrack_core::ShipmentId;
use shiptrack_state::ShipmentStatus;

use crate::state::ShipmentRecord;

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    id: Uuid,
    tracking_id: String,
    phone_number: String,
    description: Option<String>,
    status_id: i16,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ShipmentRow {
    /// `None` when the row carries a status code outside the catalog.
    fn into_record(self) -> Option<ShipmentRecord> {
        let status = ShipmentStatus::from_code(self.status_id)?;
        Some(ShipmentRecord {
            id: ShipmentId::from_uuid(self.id),
            tracking_id: self.tracking_id,
            phone_number: self.phone_number,
            description: self.description,
            status,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn insert(pool: &PgPool, record: &ShipmentRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO shipments
            (id, tracking_id, phone_number, description, status_id, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(record.id.as_uuid())
    .bind(&record.tracking_id)
    .bind(&record.phone_number)
    .bind(&record.description)
    .bind(record.status.code())
    .bind(record.version)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Conditional status update. Returns `false` when the row's version no
/// longer matches `prev_version`, meaning another writer got there
/// first and the caller must not treat the transition as persisted.
pub async fn update_status(
    pool: &PgPool,
    id: &ShipmentId,
    status: ShipmentStatus,
    prev_version: i64,
    updated_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE shipments
        SET status_id = $1, version = version + 1, updated_at = $2
        WHERE id = $3 AND version = $4
        "#,
    )
    .bind(status.code())
    .bind(updated_at)
    .bind(id.as_uuid())
    .bind(prev_version)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: &ShipmentId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
        .bind(id.as_uuid())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Load every shipment row into memory at startup. Rows with an
/// unknown status code are skipped and logged rather than aborting the
/// whole load.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ShipmentRecord>, sqlx::Error> {
    let rows: Vec<ShipmentRow> = sqlx::query_as(
        r#"
        SELECT id, tracking_id, phone_number, description, status_id, version,
               created_at, updated_at
        FROM shipments
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let status_id = row.status_id;
        match row.into_record() {
            Some(record) => records.push(record),
            None => {
                tracing::error!(shipment_id = %id, status_id, "skipping row with unknown status code");
            }
        }
    }
    Ok(records)
}
