//! Core identifier types used across the shelfgate crates
//!
//! Identifier newtypes keep principals, records, and audit entries from
//! being confused with one another at API boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a caller as established by the authentication layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Create a new random principal ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "principal-{}", self.0)
    }
}

impl From<Uuid> for PrincipalId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<PrincipalId> for Uuid {
    fn from(id: PrincipalId) -> Self {
        id.0
    }
}

/// Identity of a governed record (a book, a category, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Create a new random record ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record-{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Identity of an audit log entry
///
/// Monotonic within a store; assigned at append time, never by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditEntryId(pub u64);

impl AuditEntryId {
    /// Create from a raw sequence number
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Get the inner sequence number
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The next id in sequence
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audit-{}", self.0)
    }
}

impl From<u64> for AuditEntryId {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}

/// Name of a governed entity kind, e.g. `"Book"` or `"Category"`
///
/// The access-control layer is generic over entity kinds; this is the only
/// place their names appear as data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityType(String);

impl EntityType {
    /// Create an entity type from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The entity name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}
