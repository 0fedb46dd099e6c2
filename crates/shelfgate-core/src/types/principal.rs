//! Caller identity: raw trust inputs and the classified principal
//!
//! The external authentication layer establishes *facts* about the caller
//! ([`RawIdentity`]). Classification turns those facts into a [`Principal`]
//! whose role flags are fixed for the lifetime of one request, so no
//! authorization decision ever has to re-consult group membership.

use crate::types::identifiers::PrincipalId;
use crate::types::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Group whose members are classified as administrators
pub const ADMIN_GROUP: &str = "Admin";

/// Identity facts established by the external authentication layer
///
/// This is the only trust input the policy consumes. How a session or
/// cookie produced these facts is outside the access-control core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIdentity {
    /// Stable caller id, absent for anonymous callers
    pub id: Option<PrincipalId>,
    /// Whether the authentication layer recognized the caller
    pub is_authenticated: bool,
    /// Unrestricted authority flag
    pub is_superuser: bool,
    /// Staff flag (coarser application-level gating)
    pub is_staff: bool,
    /// Group memberships by name
    pub groups: BTreeSet<String>,
}

impl RawIdentity {
    /// Identity of an unauthenticated caller
    pub fn anonymous() -> Self {
        Self {
            id: None,
            is_authenticated: false,
            is_superuser: false,
            is_staff: false,
            groups: BTreeSet::new(),
        }
    }

    /// Identity of an ordinary authenticated caller
    pub fn authenticated(id: PrincipalId) -> Self {
        Self {
            id: Some(id),
            is_authenticated: true,
            is_superuser: false,
            is_staff: false,
            groups: BTreeSet::new(),
        }
    }

    /// Add a group membership
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        self.groups.insert(name.into());
        self
    }

    /// Mark the caller as a superuser
    pub fn as_superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Mark the caller as staff
    pub fn as_staff(mut self) -> Self {
        self.is_staff = true;
        self
    }
}

/// The classified caller for one request
///
/// `is_admin` is computed once at classification time from group
/// membership, never looked up again during a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable caller id, absent for the anonymous principal
    pub id: Option<PrincipalId>,
    /// Whether the caller is authenticated
    pub is_authenticated: bool,
    /// Unrestricted authority; bypasses every ownership check
    pub is_superuser: bool,
    /// Staff flag
    pub is_staff: bool,
    /// Member of the [`ADMIN_GROUP`] group
    pub is_admin: bool,
}

impl Principal {
    /// The anonymous principal: unauthenticated, no flags set
    pub fn anonymous() -> Self {
        Self {
            id: None,
            is_authenticated: false,
            is_superuser: false,
            is_staff: false,
            is_admin: false,
        }
    }

    /// Whether this principal created the given record
    ///
    /// Anonymous principals own nothing; an unowned record is owned by
    /// nobody.
    pub fn owns(&self, record: &Record) -> bool {
        self.id.is_some() && record.created_by == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::identifiers::{EntityType, RecordId};

    #[test]
    fn test_anonymous_owns_nothing() {
        let anon = Principal::anonymous();
        // Even a record whose owner was cleared is not owned by anonymous.
        let record = Record::new(EntityType::new("Book"), RecordId::new());
        assert!(!anon.owns(&record));
    }

    #[test]
    fn test_owner_matches() {
        let id = PrincipalId::new();
        let principal = Principal {
            id: Some(id),
            is_authenticated: true,
            is_superuser: false,
            is_staff: false,
            is_admin: true,
        };
        let mut record = Record::new(EntityType::new("Book"), RecordId::new());
        assert!(!principal.owns(&record));
        record.stamp_owner(id);
        assert!(principal.owns(&record));
    }
}
