//! The governed record: the unit the ownership policy decides over
//!
//! A [`Record`] is the access-control view of any domain entity. The
//! storage collaborator owns the domain fields; the policy only needs the
//! identity, the entity kind, and the ownership reference.

use crate::types::identifiers::{EntityType, PrincipalId, RecordId};
use serde::{Deserialize, Serialize};

/// Access-control metadata of a governed entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identity
    pub id: RecordId,
    /// Which entity kind this record belongs to
    pub entity_type: EntityType,
    /// The principal that created the record, if any
    ///
    /// Weak reference: deleting the creating principal clears this field,
    /// it never cascades to the record itself.
    pub created_by: Option<PrincipalId>,
}

impl Record {
    /// Create an unowned record
    pub fn new(entity_type: EntityType, id: RecordId) -> Self {
        Self {
            id,
            entity_type,
            created_by: None,
        }
    }

    /// Create a record owned by the given principal
    pub fn owned_by(entity_type: EntityType, id: RecordId, owner: PrincipalId) -> Self {
        Self {
            id,
            entity_type,
            created_by: Some(owner),
        }
    }

    /// Stamp ownership on an unowned record
    ///
    /// Idempotent: an existing owner is never overwritten, regardless of
    /// caller. Returns whether the stamp was applied.
    pub fn stamp_owner(&mut self, owner: PrincipalId) -> bool {
        if self.created_by.is_none() {
            self.created_by = Some(owner);
            true
        } else {
            false
        }
    }

    /// Clear the ownership reference
    ///
    /// Used when the creating principal is deleted: the record survives,
    /// only the reference goes away.
    pub fn clear_owner(&mut self) {
        self.created_by = None;
    }

    /// Whether the given principal id created this record
    pub fn is_owned_by(&self, principal: PrincipalId) -> bool {
        self.created_by == Some(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_owner_sets_once() {
        let mut record = Record::new(EntityType::new("Category"), RecordId::new());
        let first = PrincipalId::new();
        let second = PrincipalId::new();

        assert!(record.stamp_owner(first));
        assert!(record.is_owned_by(first));

        // A second stamp, by anyone, must not change the owner.
        assert!(!record.stamp_owner(second));
        assert!(record.is_owned_by(first));
    }

    #[test]
    fn test_clear_owner_keeps_record() {
        let owner = PrincipalId::new();
        let mut record = Record::owned_by(EntityType::new("Book"), RecordId::new(), owner);
        record.clear_owner();
        assert_eq!(record.created_by, None);
        // Cleared records can be re-stamped.
        assert!(record.stamp_owner(owner));
    }
}
