//! Data model definitions for the record store.
//!
//! This module defines the persisted entity, [`Record`], together with the
//! two input shapes callers use to mutate it: [`NewRecord`] for creation and
//! [`RecordPatch`] for partial updates. The store owns every field a caller
//! cannot set directly (`id`, `created_at`, the audit columns).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store. Monotonically increasing, never reused.
pub type RecordId = u64;

/// One persisted record of the `sample.model` entity.
///
/// Records are stored as JSON under their [`RecordId`] key. The `active`
/// flag carries archive semantics: `false` means archived, not deleted, and
/// archived records stay readable through an explicit query override.
///
/// # Examples
///
/// ```no_run
/// use sample_records::{NewRecord, RecordStore};
///
/// let store = RecordStore::open("records.redb")?;
/// let record = store.create(NewRecord::new("First record"), Some("admin"))?;
/// assert!(record.active);
/// assert_eq!(record.created_at, record.updated_at);
/// # Ok::<(), sample_records::StoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier. Immutable for the lifetime of the record.
    pub id: RecordId,

    /// Required display name. Never empty for a persisted record.
    pub name: String,

    /// Optional long-form description. No length constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Archive flag. Default queries only see records where this is `true`.
    pub active: bool,

    /// Set exactly once when the record is created. Never user-editable.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful mutation. Equals `created_at` at creation.
    pub updated_at: DateTime<Utc>,

    /// Login of whoever created the record, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Login of whoever last mutated the record, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Caller-supplied fields for [`RecordStore::create`](crate::RecordStore::create).
///
/// Only `name` is required; `active` defaults to `true` so new records are
/// visible in default queries immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            active: true,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Create the record already archived.
    #[must_use]
    pub fn archived(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Partial update for [`RecordStore::update`](crate::RecordStore::update).
///
/// `None` leaves a field untouched. `description` is doubly optional so a
/// patch can distinguish "keep it" from "clear it to null". Neither `id`
/// nor `created_at` can appear in a patch.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.active.is_none()
    }
}
