//! Policy evaluation logic
//!
//! Rules are evaluated in a fixed precedence order:
//!
//! 1. unauthenticated callers are denied everything;
//! 2. superusers are allowed everything, bypassing ownership;
//! 3. deletes require the admin or staff role and self- or no ownership
//!    of the target, denied with a friendly redirect-style message;
//! 4. updates by admins of a record created by a *different* principal are
//!    denied hard, because the check runs at object-fetch time before any
//!    form is rendered;
//! 5. creates are open to any authenticated caller that reaches the
//!    mediator;
//! 6. reads are open to any authenticated caller, with no per-row
//!    redaction.
//!
//! The delete/update asymmetry (friendly vs. hard denial) is intentional
//! and mirrors when in the request lifecycle each check can run.

use shelfgate_core::{Action, GateError, Principal, Record, ViewKind};
use tracing::debug;

/// User-facing message for cross-ownership mutation attempts
pub const READ_ONLY_MESSAGE: &str =
    "Read-only for your role: you cannot delete records created by another admin.";

const EDIT_OWN_MESSAGE: &str = "Admins may only edit records they created.";
const AUTH_REQUIRED_MESSAGE: &str = "Authentication required.";
const DELETE_ROLE_MESSAGE: &str = "Your role does not permit deleting records.";

/// Result of policy evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The action may proceed
    Allow,
    /// The action is refused
    Deny(Denial),
}

impl Verdict {
    /// Whether the action may proceed
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    fn deny(kind: DenialKind, reason: impl Into<String>) -> Self {
        Verdict::Deny(Denial {
            kind,
            reason: reason.into(),
        })
    }
}

/// How a denial should be surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// No principal: surfaced as "must log in"
    Unauthenticated,
    /// Redirect plus a human message; used in list/bulk/delete flows
    Friendly,
    /// Rejected request (403-equivalent); used at object-fetch time
    Hard,
}

/// A refused action with its user-facing reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// How to surface the refusal
    pub kind: DenialKind,
    /// Human-readable reason
    pub reason: String,
}

impl Denial {
    /// Convert the hard and unauthenticated kinds into the matching error.
    ///
    /// Friendly denials are values, not errors; mapping one here still
    /// yields a permission error for callers that have no redirect channel.
    pub fn into_error(self) -> GateError {
        match self.kind {
            DenialKind::Unauthenticated => GateError::authentication_required(self.reason),
            DenialKind::Friendly | DenialKind::Hard => GateError::permission_denied(self.reason),
        }
    }
}

/// Decide whether `principal` may perform `action` on `target`.
///
/// `target` is the fetched record for update/delete views and `None` for
/// collection-level views. The decision is pure; the caller is responsible
/// for snapshotting the target before asking.
pub fn authorize(
    principal: &Principal,
    action: Action,
    target: Option<&Record>,
    view: ViewKind,
) -> Verdict {
    let verdict = evaluate(principal, target, view);
    match &verdict {
        Verdict::Allow => debug!(%action, %view, "authorization allowed"),
        Verdict::Deny(denial) => {
            debug!(%action, %view, kind = ?denial.kind, reason = %denial.reason, "authorization denied");
        }
    }
    verdict
}

fn evaluate(principal: &Principal, target: Option<&Record>, view: ViewKind) -> Verdict {
    if !principal.is_authenticated {
        return Verdict::deny(DenialKind::Unauthenticated, AUTH_REQUIRED_MESSAGE);
    }
    if principal.is_superuser {
        return Verdict::Allow;
    }
    match view {
        ViewKind::Delete => {
            if !(principal.is_admin || principal.is_staff) {
                return Verdict::deny(DenialKind::Friendly, DELETE_ROLE_MESSAGE);
            }
            match target {
                Some(record) if record.created_by.is_none() || principal.owns(record) => {
                    Verdict::Allow
                }
                // An unresolvable target is treated like a foreign one.
                _ => Verdict::deny(DenialKind::Friendly, READ_ONLY_MESSAGE),
            }
        }
        ViewKind::Update => {
            if !principal.is_admin {
                // Staff and other authenticated callers are not further
                // restricted here; coarser gating happens upstream.
                return Verdict::Allow;
            }
            match target.and_then(|record| record.created_by) {
                Some(owner) if Some(owner) != principal.id => {
                    Verdict::deny(DenialKind::Hard, EDIT_OWN_MESSAGE)
                }
                _ => Verdict::Allow,
            }
        }
        ViewKind::Create | ViewKind::List | ViewKind::Detail => Verdict::Allow,
    }
}

/// Decide whether `principal` may delete *every* target in the batch.
///
/// All-or-nothing: one foreign-owned target denies the whole batch. The
/// caller must pass the full ownership snapshot taken before any deletion
/// starts, so concurrent modification of the batch cannot split the
/// decision.
pub fn authorize_bulk(principal: &Principal, targets: &[Record]) -> Verdict {
    if !principal.is_authenticated {
        return Verdict::deny(DenialKind::Unauthenticated, AUTH_REQUIRED_MESSAGE);
    }
    if principal.is_superuser {
        return Verdict::Allow;
    }
    if !(principal.is_admin || principal.is_staff) {
        return Verdict::deny(DenialKind::Friendly, DELETE_ROLE_MESSAGE);
    }
    let forbidden = targets
        .iter()
        .any(|record| record.created_by.is_some() && !principal.owns(record));
    if forbidden {
        debug!(targets = targets.len(), "bulk delete denied");
        Verdict::deny(DenialKind::Friendly, READ_ONLY_MESSAGE)
    } else {
        debug!(targets = targets.len(), "bulk delete allowed");
        Verdict::Allow
    }
}

/// Whether a record should render read-only for this principal.
///
/// True when an admin is looking at a record another principal created;
/// superusers and non-admins never see the read-only presentation.
pub fn read_only_for(principal: &Principal, record: &Record) -> bool {
    principal.is_admin
        && !principal.is_superuser
        && record.created_by.is_some()
        && !principal.owns(record)
}
