//! The mediated request abstraction and operation outcomes

use serde::{Deserialize, Serialize};
use shelfgate_core::{EntityType, RawIdentity, RecordId, RequestMethod, ViewKind};

/// A transport-agnostic request presented to the mediator
///
/// Routing, sessions, and templates live outside the core; by the time a
/// request reaches the mediator it has been reduced to these facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediatedRequest {
    /// Trust inputs from the authentication layer
    pub identity: RawIdentity,
    /// HTTP-style method, used for audit classification
    pub method: RequestMethod,
    /// Request path, recorded in audit details
    pub path: String,
    /// Which entity kind is being addressed
    pub entity_type: EntityType,
    /// Which view kind the request resolved to
    pub view_kind: ViewKind,
    /// Target record for single-object views
    pub target: Option<RecordId>,
}

impl MediatedRequest {
    /// Build a collection-level request
    pub fn new(
        identity: RawIdentity,
        method: RequestMethod,
        path: impl Into<String>,
        entity_type: EntityType,
        view_kind: ViewKind,
    ) -> Self {
        Self {
            identity,
            method,
            path: path.into(),
            entity_type,
            view_kind,
            target: None,
        }
    }

    /// Address a single record
    pub fn with_target(mut self, id: RecordId) -> Self {
        self.target = Some(id);
        self
    }
}

/// User-visible result of a mediated operation
///
/// Hard denials and authentication failures are *errors*, not outcomes;
/// this type only carries the results a response template can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran; here is its result
    Allowed(T),
    /// Redirect-style refusal with a human message
    DeniedFriendly {
        /// Message to show the caller
        message: String,
    },
    /// Bulk delete where referential constraints skipped some targets
    PartiallyCompleted {
        /// Targets actually deleted
        deleted: usize,
        /// Targets skipped because dependents exist
        skipped: usize,
    },
}

impl<T> Outcome<T> {
    /// Whether the operation ran to completion
    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allowed(_))
    }

    /// The result, if the operation ran
    pub fn into_allowed(self) -> Option<T> {
        match self {
            Outcome::Allowed(value) => Some(value),
            _ => None,
        }
    }

    /// The denial message, if any
    pub fn denial_message(&self) -> Option<&str> {
        match self {
            Outcome::DeniedFriendly { message } => Some(message),
            _ => None,
        }
    }
}

/// How a single delete ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDisposition {
    /// The record was removed
    Deleted,
    /// Referential constraints kept the record; "skipped: has dependent
    /// records"
    Protected,
}

/// Accounting for a completed bulk delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkDeleteReport {
    /// Targets actually deleted
    pub deleted: usize,
    /// Targets skipped because dependents exist
    pub skipped: usize,
}

impl BulkDeleteReport {
    /// Total targets considered
    pub fn total(&self) -> usize {
        self.deleted + self.skipped
    }

    /// Human summary in the shape the list views show
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} record(s); skipped {} with dependent records",
            self.deleted, self.skipped
        )
    }
}
