//! Query filtering and ordering for record retrieval.
//!
//! The default scope mirrors archive semantics: records with `active =
//! false` are excluded unless the caller opts in with
//! [`RecordQuery::include_archived`]. The default ordering is newest first,
//! with name as the tie-breaker.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Fields a query may sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    CreatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// One sort criterion. Criteria earlier in a list take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Name => a.name.cmp(&b.name),
        };
        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// The entity's default ordering: `created_at` descending, then `name`
/// ascending.
pub fn default_order() -> Vec<SortKey> {
    vec![
        SortKey::desc(SortField::CreatedAt),
        SortKey::asc(SortField::Name),
    ]
}

/// Filter and ordering for [`RecordStore::list`](crate::RecordStore::list).
///
/// `RecordQuery::default()` is the default scope: active records only, in
/// default order.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Also return records where `active = false`.
    pub include_archived: bool,
    /// Case-insensitive substring match on `name`.
    pub name_contains: Option<String>,
    /// Override the default ordering. `None` means default order.
    pub order: Option<Vec<SortKey>>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    #[must_use]
    pub fn name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, keys: Vec<SortKey>) -> Self {
        self.order = Some(keys);
        self
    }

    pub(crate) fn matches(&self, record: &Record) -> bool {
        if !self.include_archived && !record.active {
            return false;
        }
        if let Some(needle) = &self.name_contains {
            if !record
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    pub(crate) fn sort(&self, records: &mut [Record]) {
        let keys = match &self.order {
            Some(keys) => keys.clone(),
            None => default_order(),
        };
        records.sort_by(|a, b| {
            keys.iter()
                .map(|key| key.compare(a, b))
                .find(|ordering| !ordering.is_eq())
                .unwrap_or(Ordering::Equal)
        });
    }
}
