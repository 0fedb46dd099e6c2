//! Best-effort audit recording
//!
//! The recorder is the seam between the mediator and the audit store. Its
//! contract: always attempt the append, never let a failure reach the
//! governed action. The append `Result` is discarded here and nowhere
//! else, so the "never fail the primary action" rule is explicit in the
//! code rather than hidden behind a broad exception handler.

use crate::entry::{AuditAction, NewAuditEntry};
use crate::store::AuditStore;
use shelfgate_core::{EntityType, Principal};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fire-and-forget front end over an [`AuditStore`]
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    /// Create a recorder over the given store
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Record a mediated action.
    ///
    /// Only authenticated admin principals are recorded; actions by other
    /// callers pass through silently. Append failures are logged at warn
    /// level and otherwise discarded — never retried, never surfaced, and
    /// never written to the same audit trail.
    pub async fn record(
        &self,
        principal: &Principal,
        action: AuditAction,
        entity_type: &EntityType,
        entity_id: &str,
        details: impl Into<String>,
    ) {
        let Some(actor) = principal.id else {
            return;
        };
        if !principal.is_admin {
            debug!(%action, "skipping audit for non-admin principal");
            return;
        }
        let entry = NewAuditEntry {
            actor,
            action,
            entity_type: entity_type.clone(),
            entity_id: entity_id.to_string(),
            details: details.into(),
        };
        // The one call site where an audit failure is dropped.
        if let Err(err) = self.store.append(entry).await {
            warn!(%err, %action, entity = %entity_type, "audit append failed; continuing");
        }
    }

    /// Record a session establishment for the given principal.
    pub async fn record_login(&self, principal: &Principal) {
        self.record(
            principal,
            AuditAction::Login,
            &EntityType::new("Session"),
            "",
            "login",
        )
        .await;
    }
}
