//! # sample_records
//!
//! An embedded record store with archive semantics, built on redb. The
//! crate makes explicit what a host ORM would normally grant by
//! declaration: a record entity with a declarative schema, a repository
//! implementing the full lifecycle (create, read, update, archive,
//! unarchive, delete), and a manifest-driven addon loader that wires access
//! rules in front of it.
//!
//! ## Features
//!
//! - **redb-based storage**: single-file, transactional, no server
//! - **Archive semantics**: `active = false` hides a record from default
//!   queries without deleting it; unarchive brings it back
//! - **Declarative schema**: entity name, field types, constraints, and
//!   defaults, introspectable by UI and access-control layers
//! - **Manifest loading**: metadata, dependency, and load-order validation
//!   for the addon's data files
//! - **Access rules**: tabular group × entity × operation grants, enforced
//!   in front of every guarded operation
//!
//! ## Quick Start
//!
//! ```no_run
//! use sample_records::{NewRecord, RecordQuery, RecordStore};
//!
//! let store = RecordStore::open("records.redb")?;
//!
//! let record = store.create(
//!     NewRecord::new("First record").description("Hello from the store"),
//!     Some("admin"),
//! )?;
//!
//! // Default queries exclude archived records and sort newest first.
//! store.archive(record.id, Some("admin"))?;
//! assert!(store.list(&RecordQuery::new())?.is_empty());
//! assert_eq!(store.list(&RecordQuery::new().include_archived())?.len(), 1);
//! # Ok::<(), sample_records::StoreError>(())
//! ```
//!
//! ## Going through the addon layer
//!
//! ```no_run
//! use sample_records::{Actor, Addon, NewRecord};
//!
//! // base_dir holds manifest.json plus the data files it lists.
//! let addon = Addon::install("sample_app", "records.redb")?;
//!
//! let manager = Actor::new("alice", "manager");
//! let record = addon.create(&manager, NewRecord::new("Guarded record"))?;
//! assert_eq!(record.created_by.as_deref(), Some("alice"));
//! # Ok::<(), sample_records::StoreError>(())
//! ```

pub mod access;
pub mod addon;
pub mod error;
pub mod manifest;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;


pub use access::{AccessRule, AccessTable, Operation};
pub use addon::{Actor, Addon};
pub use error::StoreError;
pub use manifest::{AddonManifest, DataFileKind};
pub use query::{default_order, Direction, RecordQuery, SortField, SortKey};
pub use record::{NewRecord, Record, RecordId, RecordPatch};
pub use schema::{sample_record_schema, EntitySchema, FieldDef, FieldKind, ENTITY_NAME};
pub use store::RecordStore;
