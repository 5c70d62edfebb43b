//! RosterStore — redb-backed persistence for rota.
//!
//! Provides typed operations over volunteers, roles, occurrences, and
//! assignments. All values are JSON-serialized into redb's `&[u8]` value
//! columns. The store supports both on-disk and in-memory backends (the
//! latter for testing).
//!
//! Assignment batches produced by a run go through
//! [`RosterStore::insert_assignments`], which uses a single write
//! transaction: a failure before commit persists nothing.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe roster store backed by redb.
#[derive(Clone)]
pub struct RosterStore {
    db: Arc<Database>,
}

impl RosterStore {
    /// Open (or create) a persistent roster store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "roster store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory roster store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory roster store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(VOLUNTEERS).map_err(map_err!(Table))?;
        txn.open_table(ROLES).map_err(map_err!(Table))?;
        txn.open_table(OCCURRENCES).map_err(map_err!(Table))?;
        txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Generic helpers ────────────────────────────────────────────

    fn put<T: Serialize>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut t = txn.open_table(table).map_err(map_err!(Table))?;
            t.insert(key, bytes.as_slice()).map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let t = txn.open_table(table).map_err(map_err!(Table))?;
        match t.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let value = serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Collect all values whose key starts with `prefix`, in key order.
    fn scan_prefix<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        prefix: &str,
    ) -> StoreResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let t = txn.open_table(table).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in t.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if key.value().starts_with(prefix) {
                let item: T =
                    serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
                results.push(item);
            }
        }
        Ok(results)
    }

    // ── Volunteers ─────────────────────────────────────────────────

    /// Insert or update a volunteer.
    pub fn put_volunteer(&self, org: &str, volunteer: &Volunteer) -> StoreResult<()> {
        self.put(VOLUNTEERS, &volunteer.table_key(org), volunteer)
    }

    /// Get a volunteer by id.
    pub fn get_volunteer(&self, org: &str, id: &str) -> StoreResult<Option<Volunteer>> {
        self.get(VOLUNTEERS, &format!("{org}:{id}"))
    }

    /// List an organization's full volunteer pool.
    pub fn list_volunteers(&self, org: &str) -> StoreResult<Vec<Volunteer>> {
        self.scan_prefix(VOLUNTEERS, &format!("{org}:"))
    }

    // ── Roles ──────────────────────────────────────────────────────

    /// Insert or update a role.
    pub fn put_role(&self, org: &str, role: &Role) -> StoreResult<()> {
        self.put(ROLES, &role.table_key(org), role)
    }

    /// Get a role by id.
    pub fn get_role(&self, org: &str, id: &str) -> StoreResult<Option<Role>> {
        self.get(ROLES, &format!("{org}:{id}"))
    }

    /// List an organization's roles.
    pub fn list_roles(&self, org: &str) -> StoreResult<Vec<Role>> {
        self.scan_prefix(ROLES, &format!("{org}:"))
    }

    // ── Occurrences ────────────────────────────────────────────────

    /// Insert or update an event occurrence.
    pub fn put_occurrence(&self, org: &str, occurrence: &EventOccurrence) -> StoreResult<()> {
        self.put(OCCURRENCES, &occurrence.table_key(org), occurrence)
    }

    /// List an organization's occurrences whose date falls inside `period`,
    /// date ascending.
    pub fn list_occurrences_in_period(
        &self,
        org: &str,
        period: Period,
    ) -> StoreResult<Vec<EventOccurrence>> {
        let mut occurrences: Vec<EventOccurrence> =
            self.scan_prefix(OCCURRENCES, &format!("{org}:"))?;
        occurrences.retain(|o| period.contains(o.date));
        // Key order already sorts by date; keep it explicit.
        occurrences.sort_by_key(|o| o.date);
        Ok(occurrences)
    }

    // ── Assignments ────────────────────────────────────────────────

    /// Insert a single assignment record.
    pub fn insert_assignment(&self, org: &str, assignment: &Assignment) -> StoreResult<()> {
        self.put(ASSIGNMENTS, &assignment.table_key(org), assignment)
    }

    /// Persist a run's output as one atomic batch. Either every record in
    /// `batch` is committed or none is.
    pub fn insert_assignments(&self, org: &str, batch: &[Assignment]) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut t = txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
            for assignment in batch {
                let bytes = serde_json::to_vec(assignment).map_err(map_err!(Serialize))?;
                t.insert(assignment.table_key(org).as_str(), bytes.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(org, count = batch.len(), "assignment batch committed");
        Ok(())
    }

    /// List all assignments for one occurrence.
    pub fn list_assignments_for_occurrence(
        &self,
        org: &str,
        occurrence_id: &str,
    ) -> StoreResult<Vec<Assignment>> {
        self.scan_prefix(ASSIGNMENTS, &format!("{org}:{occurrence_id}:"))
    }

    // ── Import ─────────────────────────────────────────────────────

    /// Load an organization dataset in one write transaction.
    pub fn import_dataset(&self, dataset: &OrgDataset) -> StoreResult<()> {
        let org = dataset.organization.as_str();
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut volunteers = txn.open_table(VOLUNTEERS).map_err(map_err!(Table))?;
            for v in &dataset.volunteers {
                let bytes = serde_json::to_vec(v).map_err(map_err!(Serialize))?;
                volunteers
                    .insert(v.table_key(org).as_str(), bytes.as_slice())
                    .map_err(map_err!(Write))?;
            }
            let mut roles = txn.open_table(ROLES).map_err(map_err!(Table))?;
            for r in &dataset.roles {
                let bytes = serde_json::to_vec(r).map_err(map_err!(Serialize))?;
                roles
                    .insert(r.table_key(org).as_str(), bytes.as_slice())
                    .map_err(map_err!(Write))?;
            }
            let mut occurrences = txn.open_table(OCCURRENCES).map_err(map_err!(Table))?;
            for o in &dataset.occurrences {
                let bytes = serde_json::to_vec(o).map_err(map_err!(Serialize))?;
                occurrences
                    .insert(o.table_key(org).as_str(), bytes.as_slice())
                    .map_err(map_err!(Write))?;
            }
            let mut assignments = txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
            for a in &dataset.assignments {
                let bytes = serde_json::to_vec(a).map_err(map_err!(Serialize))?;
                assignments
                    .insert(a.table_key(org).as_str(), bytes.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(
            org,
            volunteers = dataset.volunteers.len(),
            roles = dataset.roles.len(),
            occurrences = dataset.occurrences.len(),
            "dataset imported"
        );
        Ok(())
    }
}
