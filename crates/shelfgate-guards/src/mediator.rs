//! The request mediator
//!
//! Orchestrates one request through classify → authorize → execute →
//! audit. Authorization happens against a snapshot of the target taken
//! before the decision; bulk deletes snapshot the entire candidate set
//! first, then act, so the allow/deny decision is all-or-nothing even if
//! the batch changes concurrently.

use crate::request::{BulkDeleteReport, DeleteDisposition, MediatedRequest, Outcome};
use crate::storage::{DeleteError, FieldMap, RecordDraft, RecordFilter, Storage};
use shelfgate_authorization::{authorize, authorize_bulk, classify, Denial, DenialKind, Verdict};
use shelfgate_core::{
    Action, GateError, GateResult, Principal, PrincipalId, Record, RecordId, ViewKind,
};
use shelfgate_journal::{AuditAction, AuditRecorder};
use std::sync::Arc;
use tracing::debug;

/// Mediates every operation against governed records
#[derive(Clone)]
pub struct RequestMediator {
    storage: Arc<dyn Storage>,
    recorder: AuditRecorder,
}

impl RequestMediator {
    /// Create a mediator over the given collaborators
    pub fn new(storage: Arc<dyn Storage>, recorder: AuditRecorder) -> Self {
        Self { storage, recorder }
    }

    /// Serve a collection listing
    pub async fn list(&self, request: &MediatedRequest) -> GateResult<Outcome<Vec<Record>>> {
        let principal = classify(&request.identity);
        match authorize(&principal, Action::Read, None, ViewKind::List) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        let records = self
            .storage
            .query(&request.entity_type, &RecordFilter::all())
            .await?;
        self.audit(&principal, request, "").await;
        Ok(Outcome::Allowed(records))
    }

    /// Serve a single-record view
    pub async fn detail(&self, request: &MediatedRequest) -> GateResult<Outcome<Record>> {
        let principal = classify(&request.identity);
        let target_id = required_target(request)?;
        match authorize(&principal, Action::Read, None, ViewKind::Detail) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        let record = self.storage.get(&request.entity_type, target_id).await?;
        self.audit(&principal, request, &record.id.to_string()).await;
        Ok(Outcome::Allowed(record))
    }

    /// Create a record, stamping the acting principal as owner
    ///
    /// The stamp is idempotent: a draft that already carries an owner
    /// (e.g. from an import) keeps it.
    pub async fn create(
        &self,
        request: &MediatedRequest,
        mut draft: RecordDraft,
    ) -> GateResult<Outcome<Record>> {
        let principal = classify(&request.identity);
        match authorize(&principal, Action::Create, None, ViewKind::Create) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        if draft.created_by.is_none() {
            draft.created_by = principal.id;
        }
        let record = self.storage.create(&request.entity_type, draft).await?;
        self.audit(&principal, request, &record.id.to_string()).await;
        Ok(Outcome::Allowed(record))
    }

    /// Update a record
    ///
    /// Ownership is checked against the record fetched here, before any
    /// mutation; a cross-ownership attempt by an admin is a hard error.
    pub async fn update(
        &self,
        request: &MediatedRequest,
        fields: FieldMap,
    ) -> GateResult<Outcome<Record>> {
        let principal = classify(&request.identity);
        let target_id = required_target(request)?;
        let target = self.storage.get(&request.entity_type, target_id).await?;
        match authorize(&principal, Action::Update, Some(&target), ViewKind::Update) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        let updated = self.storage.update(&target, fields).await?;
        self.audit(&principal, request, &updated.id.to_string()).await;
        Ok(Outcome::Allowed(updated))
    }

    /// Delete a record
    ///
    /// A storage-level referential refusal is reported as
    /// [`DeleteDisposition::Protected`], distinct from any authorization
    /// denial.
    pub async fn delete(
        &self,
        request: &MediatedRequest,
    ) -> GateResult<Outcome<DeleteDisposition>> {
        let principal = classify(&request.identity);
        let target_id = required_target(request)?;
        let target = self.storage.get(&request.entity_type, target_id).await?;
        match authorize(&principal, Action::Delete, Some(&target), ViewKind::Delete) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        let disposition = match self.storage.delete(&target).await {
            Ok(()) => DeleteDisposition::Deleted,
            Err(DeleteError::Protected) => DeleteDisposition::Protected,
            Err(DeleteError::Storage(err)) => return Err(err),
        };
        self.audit(&principal, request, &target.id.to_string()).await;
        Ok(Outcome::Allowed(disposition))
    }

    /// Delete a batch of records, all-or-nothing with respect to
    /// authorization
    ///
    /// The entire candidate set is snapshotted and authorized before any
    /// deletion runs. Referentially protected targets are skipped and
    /// counted; `deleted + skipped` always equals the snapshot size.
    pub async fn bulk_delete(
        &self,
        request: &MediatedRequest,
        ids: &[RecordId],
    ) -> GateResult<Outcome<BulkDeleteReport>> {
        let principal = classify(&request.identity);
        let targets = self
            .storage
            .query(
                &request.entity_type,
                &RecordFilter::with_ids(ids.iter().copied()),
            )
            .await?;
        match authorize_bulk(&principal, &targets) {
            Verdict::Allow => {}
            Verdict::Deny(denial) => return denied(denial),
        }
        let mut report = BulkDeleteReport::default();
        for record in &targets {
            match self.storage.delete(record).await {
                Ok(()) => report.deleted += 1,
                Err(DeleteError::Protected) => report.skipped += 1,
                Err(DeleteError::Storage(err)) => return Err(err),
            }
        }
        debug!(deleted = report.deleted, skipped = report.skipped, "bulk delete finished");
        self.audit(&principal, request, "").await;
        if report.skipped > 0 {
            Ok(Outcome::PartiallyCompleted {
                deleted: report.deleted,
                skipped: report.skipped,
            })
        } else {
            Ok(Outcome::Allowed(report))
        }
    }

    /// Backfill ownership on records that predate ownership tracking
    ///
    /// Stamps `new_owner` on every record of the entity type whose
    /// `created_by` is unset. Superuser only. Returns how many records
    /// were stamped.
    pub async fn assign_unowned(
        &self,
        request: &MediatedRequest,
        new_owner: PrincipalId,
    ) -> GateResult<usize> {
        let principal = classify(&request.identity);
        if !principal.is_authenticated {
            return Err(GateError::authentication_required(
                "log in to reassign ownership",
            ));
        }
        if !principal.is_superuser {
            return Err(GateError::permission_denied(
                "only a superuser may reassign ownership",
            ));
        }
        let records = self
            .storage
            .query(&request.entity_type, &RecordFilter::all())
            .await?;
        let mut stamped = 0;
        for mut record in records {
            if record.stamp_owner(new_owner) {
                self.storage.update(&record, FieldMap::new()).await?;
                stamped += 1;
            }
        }
        self.audit(&principal, request, "").await;
        Ok(stamped)
    }

    /// Record a login for the classified caller
    pub async fn record_login(&self, request: &MediatedRequest) {
        let principal = classify(&request.identity);
        self.recorder.record_login(&principal).await;
    }

    // Best-effort audit; runs after execution and never blocks the
    // response.
    async fn audit(&self, principal: &Principal, request: &MediatedRequest, entity_id: &str) {
        let action = AuditAction::from_method(request.method);
        let details = format!("path={} method={}", request.path, request.method);
        self.recorder
            .record(principal, action, &request.entity_type, entity_id, details)
            .await;
    }
}

fn required_target(request: &MediatedRequest) -> GateResult<RecordId> {
    request
        .target
        .ok_or_else(|| GateError::invalid(format!("{} request missing target id", request.view_kind)))
}

// Friendly denials become outcomes; everything else becomes an error.
fn denied<T>(denial: Denial) -> GateResult<Outcome<T>> {
    match denial.kind {
        DenialKind::Friendly => Ok(Outcome::DeniedFriendly {
            message: denial.reason,
        }),
        DenialKind::Unauthenticated | DenialKind::Hard => Err(denial.into_error()),
    }
}
