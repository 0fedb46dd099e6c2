//! Audit log entry types

use serde::{Deserialize, Serialize};
use shelfgate_core::{AuditEntryId, EntityType, PrincipalId, RequestMethod};
use std::fmt;
use time::OffsetDateTime;

/// What an audit entry records the actor as having done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    /// A read view was served
    Read,
    /// A record was created
    Create,
    /// A record was modified
    Update,
    /// A record was deleted
    Delete,
    /// A session was established
    Login,
}

impl AuditAction {
    /// Stable lowercase name as stored and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Read => "read",
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Login => "login",
        }
    }

    /// Classify a request method for the generic audit wrapper.
    ///
    /// GET/HEAD log as `read`; every other method logs as `update`, even
    /// for creates and deletes routed through the generic wrapper. The
    /// coarse classification is intentional and preserved as-is.
    pub fn from_method(method: RequestMethod) -> Self {
        if method.is_read() {
            AuditAction::Read
        } else {
            AuditAction::Update
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one mediated action
///
/// Never updated or deleted after creation. `id` and `timestamp` are
/// assigned by the store at append time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Store-assigned monotonic id
    pub id: AuditEntryId,
    /// Who acted
    pub actor: PrincipalId,
    /// What they did
    pub action: AuditAction,
    /// Which entity kind was touched
    pub entity_type: EntityType,
    /// Which record was touched; empty for collection-level actions
    pub entity_id: String,
    /// When the entry was appended
    pub timestamp: OffsetDateTime,
    /// Free-form context, e.g. `path=/books method=POST`
    pub details: String,
}

/// The caller-supplied part of an audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditEntry {
    /// Who acted
    pub actor: PrincipalId,
    /// What they did
    pub action: AuditAction,
    /// Which entity kind was touched
    pub entity_type: EntityType,
    /// Which record was touched; empty for collection-level actions
    pub entity_id: String,
    /// Free-form context
    pub details: String,
}
