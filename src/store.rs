//! The record repository: CRUD, archive semantics, and the id sequence,
//! implemented over a single redb database file.
//!
//! Records are serialized to JSON and stored under their `u64` id. A second
//! table holds the id sequence, which only ever advances: deleted ids are
//! never handed out again.

use std::path::Path;

use chrono::Utc;
use log::info;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::error::StoreError;
use crate::query::RecordQuery;
use crate::record::{NewRecord, Record, RecordId, RecordPatch};
use crate::schema::ENTITY_NAME;

const RECORDS: TableDefinition<u64, &[u8]> = TableDefinition::new("records");
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Handle to one record database.
///
/// All methods take `&self`; redb serializes writers internally, so the
/// handle can be shared across threads.
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    /// Opens the database at `path`, creating it (and the tables) if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path)?;

        // Create both tables up front so first reads find them.
        let txn = db.begin_write()?;
        {
            txn.open_table(RECORDS)?;
            txn.open_table(SEQUENCES)?;
        }
        txn.commit()?;

        info!("record store ready at {}", path.display());
        Ok(Self { db })
    }

    /// Inserts a new record, assigning the next id from the persisted
    /// sequence and stamping `created_at`/`updated_at` with the current
    /// time.
    ///
    /// Fails with [`StoreError::Validation`] before anything is written if
    /// `name` is empty or whitespace. `actor`, when given, is recorded as
    /// `created_by` and `updated_by`.
    pub fn create(&self, new: NewRecord, actor: Option<&str>) -> Result<Record, StoreError> {
        if new.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "name is required and must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let txn = self.db.begin_write()?;
        let record;
        {
            let mut sequences = txn.open_table(SEQUENCES)?;
            let id = sequences.get(ENTITY_NAME)?.map_or(1, |v| v.value());
            sequences.insert(ENTITY_NAME, id + 1)?;

            record = Record {
                id,
                name: new.name,
                description: new.description,
                active: new.active,
                created_at: now,
                updated_at: now,
                created_by: actor.map(str::to_string),
                updated_by: actor.map(str::to_string),
            };

            let bytes = serde_json::to_vec(&record)?;
            let mut records = txn.open_table(RECORDS)?;
            records.insert(record.id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(record)
    }

    /// Fetches a single record by id. By-id reads ignore the archive scope:
    /// archived records are returned too.
    pub fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let txn = self.db.begin_read()?;
        let records = txn.open_table(RECORDS)?;
        match records.get(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes.value())?)),
            None => Ok(None),
        }
    }

    /// Runs a query and returns the matching records, sorted.
    ///
    /// The default query excludes archived records and orders by
    /// `created_at` descending then `name` ascending; both can be overridden
    /// on [`RecordQuery`]. Each call re-executes against current state.
    pub fn list(&self, query: &RecordQuery) -> Result<Vec<Record>, StoreError> {
        let txn = self.db.begin_read()?;
        let records = txn.open_table(RECORDS)?;
        let mut out = Vec::new();
        for item in records.iter()? {
            let (_, value) = item?;
            let record: Record = serde_json::from_slice(value.value())?;
            if query.matches(&record) {
                out.push(record);
            }
        }
        query.sort(&mut out);
        Ok(out)
    }

    /// Applies a partial update to the identified record and returns the
    /// updated state.
    ///
    /// `id` and `created_at` are preserved verbatim; `updated_at` (and
    /// `updated_by`, when an actor is given) are refreshed. Fails with
    /// [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Validation`] if the patch would leave `name` empty.
    pub fn update(
        &self,
        id: RecordId,
        patch: RecordPatch,
        actor: Option<&str>,
    ) -> Result<Record, StoreError> {
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(StoreError::Validation(
                    "name is required and must not be empty".to_string(),
                ));
            }
        }

        let txn = self.db.begin_write()?;
        let updated;
        {
            let mut records = txn.open_table(RECORDS)?;
            let mut record: Record = match records.get(id)? {
                Some(bytes) => serde_json::from_slice(bytes.value())?,
                None => return Err(StoreError::no_record(id)),
            };

            if let Some(name) = patch.name {
                record.name = name;
            }
            if let Some(description) = patch.description {
                record.description = description;
            }
            if let Some(active) = patch.active {
                record.active = active;
            }
            record.updated_at = Utc::now();
            if actor.is_some() {
                record.updated_by = actor.map(str::to_string);
            }

            let bytes = serde_json::to_vec(&record)?;
            records.insert(id, bytes.as_slice())?;
            updated = record;
        }
        txn.commit()?;
        Ok(updated)
    }

    /// Sets `active = false` (logical delete). Idempotent: archiving an
    /// already-archived record succeeds.
    pub fn archive(&self, id: RecordId, actor: Option<&str>) -> Result<Record, StoreError> {
        self.update(id, RecordPatch::new().active(false), actor)
    }

    /// Sets `active = true`, bringing an archived record back into default
    /// queries. Idempotent.
    pub fn unarchive(&self, id: RecordId, actor: Option<&str>) -> Result<Record, StoreError> {
        self.update(id, RecordPatch::new().active(true), actor)
    }

    /// Physically removes the record. Irreversible; the id is not reused.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id. Would fail
    /// with [`StoreError::ReferentialIntegrity`] if other entities
    /// referenced the record, but no relations exist in this schema.
    pub fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        let mut records = txn.open_table(RECORDS)?;
        let removed = records.remove(id)?.is_some();
        drop(records);
        txn.commit()?;
        if removed {
            Ok(())
        } else {
            Err(StoreError::no_record(id))
        }
    }

    /// Removes every record and returns how many were removed. The id
    /// sequence is left alone, so ids from cleared records are never reused.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let txn = self.db.begin_write()?;
        let removed = {
            let records = txn.open_table(RECORDS)?;
            records.len()? as usize
        };
        txn.delete_table(RECORDS)?;
        txn.open_table(RECORDS)?;
        txn.commit()?;
        info!("cleared {removed} records");
        Ok(removed)
    }

    /// Number of records matching the query.
    pub fn count(&self, query: &RecordQuery) -> Result<usize, StoreError> {
        Ok(self.list(query)?.len())
    }
}
