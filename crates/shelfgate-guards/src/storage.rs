//! Storage collaborator interface
//!
//! The core does not persist domain records itself; it drives a storage
//! collaborator through this trait. Storage owns the domain fields and the
//! referential constraints; the mediator only sees access-control metadata
//! and a generic field map.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelfgate_core::{EntityType, GateError, GateResult, PrincipalId, Record, RecordId};
use std::collections::BTreeSet;

/// Generic domain fields, opaque to the access-control layer
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Caller-supplied data for a new record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Domain fields to persist
    pub fields: FieldMap,
    /// Pre-set owner, e.g. for spreadsheet imports running as a staff user
    ///
    /// The mediator stamps the acting principal here only when unset.
    pub created_by: Option<PrincipalId>,
}

impl RecordDraft {
    /// A draft with the given fields and no owner
    pub fn new(fields: FieldMap) -> Self {
        Self {
            fields,
            created_by: None,
        }
    }

    /// An empty draft
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pre-set the owner, e.g. when importing on behalf of a principal
    pub fn with_owner(mut self, owner: PrincipalId) -> Self {
        self.created_by = Some(owner);
        self
    }
}

/// Filter for collection queries
///
/// Either everything, or an explicit id set (the shape bulk delete needs
/// to snapshot its targets).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    ids: Option<BTreeSet<RecordId>>,
}

impl RecordFilter {
    /// Match every record of the entity type
    pub fn all() -> Self {
        Self { ids: None }
    }

    /// Match only the given ids
    pub fn with_ids(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            ids: Some(ids.into_iter().collect()),
        }
    }

    /// Whether the record passes this filter
    pub fn matches(&self, record: &Record) -> bool {
        match &self.ids {
            None => true,
            Some(ids) => ids.contains(&record.id),
        }
    }
}

/// Why a delete did not happen at the storage layer
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// Refused by referential constraints; dependent records exist.
    ///
    /// Not an authorization failure: bulk flows count it as "skipped" and
    /// continue.
    #[error("delete refused: dependent records exist")]
    Protected,

    /// Any other storage failure
    #[error(transparent)]
    Storage(#[from] GateError),
}

/// Persistent storage for governed records
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch one record by id
    async fn get(&self, entity_type: &EntityType, id: RecordId) -> GateResult<Record>;

    /// Query a collection
    async fn query(&self, entity_type: &EntityType, filter: &RecordFilter)
        -> GateResult<Vec<Record>>;

    /// Create a record from a draft, honoring `draft.created_by`
    async fn create(&self, entity_type: &EntityType, draft: RecordDraft) -> GateResult<Record>;

    /// Persist a record's access-control metadata and merge `fields` over
    /// its existing domain fields
    async fn update(&self, record: &Record, fields: FieldMap) -> GateResult<Record>;

    /// Delete a record; refused with [`DeleteError::Protected`] when
    /// dependents exist
    async fn delete(&self, record: &Record) -> Result<(), DeleteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let record = Record::new(EntityType::new("Book"), RecordId::new());
        assert!(RecordFilter::all().matches(&record));
        assert!(RecordFilter::with_ids([record.id]).matches(&record));
        assert!(!RecordFilter::with_ids([RecordId::new()]).matches(&record));
    }
}
