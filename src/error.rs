use std::fmt::{Display, Formatter};

use redb::{
    CommitError, DatabaseError, Error as RedbError, StorageError, TableError, TransactionError,
};
use serde_json::Error as SerdeError;

/// Error type for every fallible operation in this crate.
///
/// The first three variants are the caller-visible failure kinds of the
/// record lifecycle; the rest surface configuration and storage problems.
#[derive(Debug)]
pub enum StoreError {
    /// A write would violate a field constraint (e.g. empty `name`).
    Validation(String),
    /// The given identifier does not resolve to an existing record.
    NotFound(String),
    /// Physical deletion blocked by live references from other entities.
    /// Declared for completeness; the current schema has no relations, so
    /// nothing raises it.
    ReferentialIntegrity(String),
    /// The acting group lacks permission for the attempted operation.
    AccessDenied(String),
    /// The addon manifest is malformed or violates load-order rules.
    Manifest(String),
    /// An access-rule file could not be parsed.
    AccessRule(String),
    /// Underlying redb failure.
    Database(String),
    /// JSON (de)serialization failure.
    Serialization(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "Validation error: {msg}"),
            StoreError::NotFound(msg) => write!(f, "Not found: {msg}"),
            StoreError::ReferentialIntegrity(msg) => {
                write!(f, "Referential integrity error: {msg}")
            }
            StoreError::AccessDenied(msg) => write!(f, "Access denied: {msg}"),
            StoreError::Manifest(msg) => write!(f, "Manifest error: {msg}"),
            StoreError::AccessRule(msg) => write!(f, "Access rule error: {msg}"),
            StoreError::Database(msg) => write!(f, "Database error: {msg}"),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<RedbError> for StoreError {
    fn from(err: RedbError) -> Self {
        match err {
            RedbError::TableDoesNotExist(name) => {
                StoreError::Database(format!("table '{name}' not found"))
            }
            RedbError::Corrupted(msg) => {
                StoreError::Database(format!("database is corrupted: {msg}"))
            }
            RedbError::Io(io_err) => StoreError::Database(format!("IO error: {io_err}")),
            _ => StoreError::Database(format!("database error: {err:?}")),
        }
    }
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        StoreError::Database(format!("database open error: {err:?}"))
    }
}

impl From<TransactionError> for StoreError {
    fn from(err: TransactionError) -> Self {
        StoreError::Database(format!("transaction error: {err:?}"))
    }
}

impl From<TableError> for StoreError {
    fn from(err: TableError) -> Self {
        StoreError::Database(format!("table operation error: {err:?}"))
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Database(format!("storage error: {err:?}"))
    }
}

impl From<CommitError> for StoreError {
    fn from(err: CommitError) -> Self {
        StoreError::Database(format!("commit error: {err:?}"))
    }
}

impl From<SerdeError> for StoreError {
    fn from(err: SerdeError) -> Self {
        StoreError::Serialization(format!("JSON serialization error: {err}"))
    }
}

impl StoreError {
    /// Shorthand for the common "no record with id N" case.
    pub(crate) fn no_record(id: u64) -> Self {
        StoreError::NotFound(format!("no record with id {id}"))
    }
}
