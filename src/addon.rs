//! Addon install layer.
//!
//! [`Addon::install`] plays the host loader: it reads the manifest, loads
//! its data files in declared order (access rules into the access table,
//! view files checked for presence), opens the store, and wires everything
//! to the entity schema. The resulting [`Addon`] exposes the record
//! lifecycle with permission checks and audit stamping in front of the raw
//! store.

use std::path::Path;

use log::{info, warn};

use crate::access::{AccessTable, Operation};
use crate::error::StoreError;
use crate::manifest::{AddonManifest, DataFileKind};
use crate::query::RecordQuery;
use crate::record::{NewRecord, Record, RecordId, RecordPatch};
use crate::schema::{sample_record_schema, EntitySchema, ENTITY_NAME};
use crate::store::RecordStore;

/// Who is performing an operation: a login for audit stamping and the
/// group the access table is checked against.
#[derive(Debug, Clone)]
pub struct Actor {
    pub login: String,
    pub group: String,
}

impl Actor {
    pub fn new(login: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            group: group.into(),
        }
    }
}

/// An installed addon: manifest, schema, access table, and record store.
pub struct Addon {
    manifest: AddonManifest,
    schema: EntitySchema,
    access: AccessTable,
    store: RecordStore,
}

impl Addon {
    /// Installs from `base_dir`, which must contain `manifest.json` and the
    /// data files it lists. The record database is created at `db_path`.
    pub fn install(
        base_dir: impl AsRef<Path>,
        db_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref();
        let manifest = AddonManifest::from_path(base_dir.join("manifest.json"))?;
        Self::install_with(manifest, base_dir, db_path)
    }

    /// Installs with an already-parsed manifest.
    pub fn install_with(
        manifest: AddonManifest,
        base_dir: impl AsRef<Path>,
        db_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        manifest.validate()?;
        if !manifest.installable {
            return Err(StoreError::Manifest(format!(
                "addon '{}' is not installable",
                manifest.name
            )));
        }

        let base_dir = base_dir.as_ref();
        let mut access = AccessTable::empty();
        for file in &manifest.data {
            let path = base_dir.join(file);
            match DataFileKind::of(file) {
                DataFileKind::AccessRules => {
                    let table = AccessTable::from_path(&path)?;
                    info!("loaded {} access rules from {file}", table.len());
                    access.merge(table);
                }
                DataFileKind::View => {
                    if !path.is_file() {
                        return Err(StoreError::Manifest(format!(
                            "view file '{file}' listed in manifest is missing"
                        )));
                    }
                    info!("registered view file {file}");
                }
                DataFileKind::Other => {
                    warn!("ignoring data file '{file}' of unknown kind");
                }
            }
        }

        if access.is_empty() {
            warn!(
                "addon '{}' loaded no access rules; every operation will be denied",
                manifest.name
            );
        }

        let store = RecordStore::open(db_path)?;
        info!("addon '{}' {} installed", manifest.name, manifest.version);

        Ok(Self {
            manifest,
            schema: sample_record_schema(),
            access,
            store,
        })
    }

    pub fn manifest(&self) -> &AddonManifest {
        &self.manifest
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn access(&self) -> &AccessTable {
        &self.access
    }

    /// The raw store, bypassing permission checks. For host-level
    /// maintenance, not for request handling.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn authorize(&self, actor: &Actor, operation: Operation) -> Result<(), StoreError> {
        if self.access.allows(&actor.group, ENTITY_NAME, operation) {
            Ok(())
        } else {
            Err(StoreError::AccessDenied(format!(
                "group '{}' may not {operation} {ENTITY_NAME}",
                actor.group
            )))
        }
    }

    /// Permission-checked create; the actor's login lands in `created_by`.
    pub fn create(&self, actor: &Actor, new: NewRecord) -> Result<Record, StoreError> {
        self.authorize(actor, Operation::Create)?;
        self.store.create(new, Some(&actor.login))
    }

    /// Permission-checked by-id read.
    pub fn get(&self, actor: &Actor, id: RecordId) -> Result<Option<Record>, StoreError> {
        self.authorize(actor, Operation::Read)?;
        self.store.get(id)
    }

    /// Permission-checked query.
    pub fn list(&self, actor: &Actor, query: &RecordQuery) -> Result<Vec<Record>, StoreError> {
        self.authorize(actor, Operation::Read)?;
        self.store.list(query)
    }

    /// Permission-checked partial update.
    pub fn update(
        &self,
        actor: &Actor,
        id: RecordId,
        patch: RecordPatch,
    ) -> Result<Record, StoreError> {
        self.authorize(actor, Operation::Write)?;
        self.store.update(id, patch, Some(&actor.login))
    }

    /// Permission-checked archive (logical delete).
    pub fn archive(&self, actor: &Actor, id: RecordId) -> Result<Record, StoreError> {
        self.authorize(actor, Operation::Write)?;
        self.store.archive(id, Some(&actor.login))
    }

    /// Permission-checked unarchive.
    pub fn unarchive(&self, actor: &Actor, id: RecordId) -> Result<Record, StoreError> {
        self.authorize(actor, Operation::Write)?;
        self.store.unarchive(id, Some(&actor.login))
    }

    /// Permission-checked physical delete.
    pub fn delete(&self, actor: &Actor, id: RecordId) -> Result<(), StoreError> {
        self.authorize(actor, Operation::Delete)?;
        self.store.delete(id)
    }
}
