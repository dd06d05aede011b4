//! # Application State
//!
//! Shared state for the API layer: the in-memory shipment store and the
//! optional Postgres pool it writes through to.
//!
//! The store is the concurrency boundary for shipment mutations: every
//! read-modify-write runs inside a single write-lock critical section
//! (see [`ShipmentStore::try_update`]), so two concurrent transitions on
//! the same shipment cannot both observe the pre-transition status.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use utoipa::ToSchema;

use shiptrack_core::ShipmentId;
use shiptrack_state::ShipmentStatus;

/// One tracked shipment as held by the store.
///
/// Invariants the store and handlers maintain together:
/// - `tracking_id` is unique across the whole store at all times.
/// - `updated_at >= created_at`; equal exactly until the first mutation.
/// - `version` starts at 1 and increases by 1 on every successful
///   mutation. The database write-through conditions its `UPDATE` on
///   the previous version.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShipmentRecord {
    /// System-generated identifier.
    #[schema(value_type = uuid::Uuid)]
    pub id: ShipmentId,
    /// Caller-supplied tracking code, immutable after creation.
    pub tracking_id: String,
    /// Recipient phone number, validated at the request boundary.
    pub phone_number: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Current lifecycle stage.
    #[schema(value_type = String, example = "ReadyToPickUp")]
    pub status: ShipmentStatus,
    /// Optimistic-write version, starting at 1.
    pub version: i64,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation.
    pub updated_at: DateTime<Utc>,
}

/// Thread-safe in-memory shipment store with a tracking-id uniqueness
/// index, backed by Postgres write-through when a pool is configured.
#[derive(Clone, Default)]
pub struct ShipmentStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    by_id: HashMap<ShipmentId, ShipmentRecord>,
    by_tracking: HashMap<String, ShipmentId>,
}

impl ShipmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new shipment, enforcing tracking-id uniqueness
    /// atomically under the write lock.
    ///
    /// Returns `false` without writing anything if the tracking id is
    /// already present.
    pub fn insert(&self, record: ShipmentRecord) -> bool {
        let mut inner = self.inner.write();
        if inner.by_tracking.contains_key(&record.tracking_id) {
            return false;
        }
        inner
            .by_tracking
            .insert(record.tracking_id.clone(), record.id);
        inner.by_id.insert(record.id, record);
        true
    }

    /// Fetch a shipment by id.
    pub fn get(&self, id: &ShipmentId) -> Option<ShipmentRecord> {
        self.inner.read().by_id.get(id).cloned()
    }

    /// Fetch a shipment by its tracking code.
    pub fn find_by_tracking(&self, tracking_id: &str) -> Option<ShipmentRecord> {
        let inner = self.inner.read();
        let id = inner.by_tracking.get(tracking_id)?;
        inner.by_id.get(id).cloned()
    }

    /// List every shipment in the store.
    pub fn list(&self) -> Vec<ShipmentRecord> {
        self.inner.read().by_id.values().cloned().collect()
    }

    /// Atomically read-validate-update one shipment under the write
    /// lock. Returns `None` if the id is unknown; otherwise the
    /// closure's result.
    ///
    /// The closure runs against a scratch copy — the stored record is
    /// replaced only when the closure returns `Ok`, so a rejected
    /// update never mutates anything.
    pub fn try_update<T, E>(
        &self,
        id: &ShipmentId,
        f: impl FnOnce(&mut ShipmentRecord) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        let mut inner = self.inner.write();
        let mut scratch = inner.by_id.get(id)?.clone();
        match f(&mut scratch) {
            Ok(value) => {
                inner.by_id.insert(*id, scratch);
                Some(Ok(value))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Delete a shipment by id, returning the removed record. The
    /// caller decides not-found from this, not from a separate
    /// existence read, and can re-insert the record if a downstream
    /// write fails.
    pub fn remove(&self, id: &ShipmentId) -> Option<ShipmentRecord> {
        let mut inner = self.inner.write();
        let record = inner.by_id.remove(id)?;
        inner.by_tracking.remove(&record.tracking_id);
        Some(record)
    }

    /// Replace the store contents with records loaded from the
    /// database at startup.
    pub fn load(&self, records: Vec<ShipmentRecord>) {
        let mut inner = self.inner.write();
        inner.by_id.clear();
        inner.by_tracking.clear();
        for record in records {
            inner
                .by_tracking
                .insert(record.tracking_id.clone(), record.id);
            inner.by_id.insert(record.id, record);
        }
    }

    /// Number of shipments currently held.
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// In-memory shipment store (authoritative within the process).
    pub shipments: ShipmentStore,
    /// Write-through Postgres pool; `None` in in-memory-only mode.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Create state in in-memory-only mode.
    pub fn new() -> Self {
        Self {
            shipments: ShipmentStore::new(),
            db_pool: None,
        }
    }

    /// Create state with an optional write-through pool.
    pub fn with_pool(db_pool: Option<PgPool>) -> Self {
        Self {
            shipments: ShipmentStore::new(),
            db_pool,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tracking: &str) -> ShipmentRecord {
        let now = Utc::now();
        ShipmentRecord {
            id: ShipmentId::new(),
            tracking_id: tracking.to_string(),
            phone_number: "+201234567890".to_string(),
            description: None,
            status: ShipmentStatus::INITIAL,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn insert_then_get_returns_record() {
        let store = ShipmentStore::new();
        let rec = record("TRK-001");
        let id = rec.id;
        assert!(store.insert(rec));
        assert_eq!(store.get(&id).unwrap().tracking_id, "TRK-001");
    }

    #[test]
    fn insert_rejects_duplicate_tracking_id() {
        let store = ShipmentStore::new();
        assert!(store.insert(record("TRK-001")));
        assert!(!store.insert(record("TRK-001")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_by_tracking_resolves() {
        let store = ShipmentStore::new();
        let rec = record("TRK-002");
        let id = rec.id;
        store.insert(rec);
        assert_eq!(store.find_by_tracking("TRK-002").unwrap().id, id);
        assert!(store.find_by_tracking("TRK-404").is_none());
    }

    #[test]
    fn try_update_unknown_id_is_none() {
        let store = ShipmentStore::new();
        let result: Option<Result<(), ()>> =
            store.try_update(&ShipmentId::new(), |_| Ok(()));
        assert!(result.is_none());
    }

    #[test]
    fn try_update_commits_on_ok() {
        let store = ShipmentStore::new();
        let rec = record("TRK-003");
        let id = rec.id;
        store.insert(rec);

        let result: Option<Result<(), ()>> = store.try_update(&id, |r| {
            r.status = ShipmentStatus::OutForDelivery;
            r.version += 1;
            Ok(())
        });
        assert_eq!(result, Some(Ok(())));

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.status, ShipmentStatus::OutForDelivery);
        assert_eq!(stored.version, 2);
    }

    #[test]
    fn try_update_rolls_back_on_err() {
        let store = ShipmentStore::new();
        let rec = record("TRK-004");
        let id = rec.id;
        store.insert(rec);

        let result: Option<Result<(), &str>> = store.try_update(&id, |r| {
            // Mutate before failing: the store must discard this.
            r.status = ShipmentStatus::Delivered;
            r.version += 1;
            Err("guard rejected")
        });
        assert_eq!(result, Some(Err("guard rejected")));

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.status, ShipmentStatus::INITIAL);
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn remove_returns_the_record_once() {
        let store = ShipmentStore::new();
        let rec = record("TRK-005");
        let id = rec.id;
        store.insert(rec);

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.tracking_id, "TRK-005");
        assert!(
            store.remove(&id).is_none(),
            "second remove must report nothing affected"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn remove_frees_the_tracking_id() {
        let store = ShipmentStore::new();
        let rec = record("TRK-006");
        let id = rec.id;
        store.insert(rec);
        let _ = store.remove(&id);

        // The tracking id can be reused after a hard delete.
        assert!(store.insert(record("TRK-006")));
    }

    #[test]
    fn removed_record_can_be_reinserted() {
        let store = ShipmentStore::new();
        let rec = record("TRK-007");
        let id = rec.id;
        store.insert(rec);

        let removed = store.remove(&id).unwrap();
        assert!(store.insert(removed), "reinsertion must restore the record");
        assert_eq!(store.get(&id).unwrap().tracking_id, "TRK-007");
        assert!(store.find_by_tracking("TRK-007").is_some());
    }

    #[test]
    fn load_replaces_contents() {
        let store = ShipmentStore::new();
        store.insert(record("TRK-OLD"));

        store.load(vec![record("TRK-A"), record("TRK-B")]);
        assert_eq!(store.len(), 2);
        assert!(store.find_by_tracking("TRK-OLD").is_none());
        assert!(store.find_by_tracking("TRK-A").is_some());
    }

    #[test]
    fn concurrent_inserts_keep_uniqueness() {
        let store = ShipmentStore::new();
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.insert(record("TRK-RACE")))
            })
            .collect();

        let winners = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1, "exactly one concurrent insert may win");
        assert_eq!(store.len(), 1);
    }
}
