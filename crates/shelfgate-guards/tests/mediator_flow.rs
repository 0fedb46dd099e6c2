//! End-to-end mediation flows over in-memory collaborators

use assert_matches::assert_matches;
use shelfgate_core::{
    EntityType, GateError, PrincipalId, RawIdentity, Record, RecordId, RequestMethod, ViewKind,
    ADMIN_GROUP,
};
use shelfgate_guards::{
    DeleteDisposition, MediatedRequest, MemoryStorage, Outcome, RecordDraft, RequestMediator,
    Storage,
};
use shelfgate_journal::{AuditAction, AuditRecorder, AuditStore, MemoryAuditStore};
use std::sync::Arc;

struct Harness {
    mediator: RequestMediator,
    storage: Arc<MemoryStorage>,
    audit: Arc<MemoryAuditStore>,
}

fn harness() -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let audit = Arc::new(MemoryAuditStore::new());
    let mediator = RequestMediator::new(storage.clone(), AuditRecorder::new(audit.clone()));
    Harness {
        mediator,
        storage,
        audit,
    }
}

fn admin_identity(id: PrincipalId) -> RawIdentity {
    RawIdentity::authenticated(id).with_group(ADMIN_GROUP)
}

fn books() -> EntityType {
    EntityType::new("Book")
}

fn request(identity: RawIdentity, method: RequestMethod, view: ViewKind) -> MediatedRequest {
    MediatedRequest::new(identity, method, "/books", books(), view)
}

async fn seed_book(storage: &MemoryStorage, owner: Option<PrincipalId>) -> Record {
    let id = RecordId::new();
    let record = match owner {
        Some(owner) => Record::owned_by(books(), id, owner),
        None => Record::new(books(), id),
    };
    storage.seed(record.clone()).await;
    record
}

#[tokio::test]
async fn create_stamps_owner_and_roundtrips() {
    let h = harness();
    let me = PrincipalId::new();
    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Create);

    let outcome = h.mediator.create(&req, RecordDraft::empty()).await.unwrap();
    let created = outcome.into_allowed().unwrap();
    assert_eq!(created.created_by, Some(me));

    // Immediately fetching the record shows the same owner.
    let detail = request(admin_identity(me), RequestMethod::Get, ViewKind::Detail)
        .with_target(created.id);
    let fetched = h
        .mediator
        .detail(&detail)
        .await
        .unwrap()
        .into_allowed()
        .unwrap();
    assert_eq!(fetched.created_by, Some(me));
}

#[tokio::test]
async fn create_keeps_preset_owner() {
    let h = harness();
    let importer = PrincipalId::new();
    let original = PrincipalId::new();
    let req = request(admin_identity(importer), RequestMethod::Post, ViewKind::Create);

    // An import draft already attributed to another principal keeps it.
    let outcome = h
        .mediator
        .create(&req, RecordDraft::empty().with_owner(original))
        .await
        .unwrap();
    assert_eq!(outcome.into_allowed().unwrap().created_by, Some(original));
}

#[tokio::test]
async fn create_by_admin_audits_one_coarse_entry() {
    let h = harness();
    let me = PrincipalId::new();
    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Create);

    h.mediator.create(&req, RecordDraft::empty()).await.unwrap();

    let entries = h.audit.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    // Non-GET calls log as update through the generic wrapper, even creates.
    assert_eq!(entries[0].action, AuditAction::Update);
    assert_eq!(entries[0].actor, me);
    assert!(entries[0].details.contains("method=POST"));
}

#[tokio::test]
async fn list_by_admin_audits_read() {
    let h = harness();
    let me = PrincipalId::new();
    seed_book(&h.storage, Some(me)).await;

    let req = request(admin_identity(me), RequestMethod::Get, ViewKind::List);
    let outcome = h.mediator.list(&req).await.unwrap();
    assert_eq!(outcome.into_allowed().unwrap().len(), 1);

    let entries = h.audit.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::Read);
    assert!(entries[0].entity_id.is_empty());
}

#[tokio::test]
async fn audit_store_failure_does_not_fail_operation() {
    let h = harness();
    h.audit.set_fail_appends(true);
    let me = PrincipalId::new();
    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Create);

    let outcome = h.mediator.create(&req, RecordDraft::empty()).await.unwrap();
    assert!(outcome.is_allowed());
}

#[tokio::test]
async fn anonymous_caller_is_rejected() {
    let h = harness();
    let req = request(RawIdentity::anonymous(), RequestMethod::Get, ViewKind::List);
    let err = h.mediator.list(&req).await.unwrap_err();
    assert_matches!(err, GateError::AuthenticationRequired { .. });
}

#[tokio::test]
async fn admin_delete_of_foreign_record_is_friendly_denial() {
    let h = harness();
    let me = PrincipalId::new();
    let foreign = seed_book(&h.storage, Some(PrincipalId::new())).await;

    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Delete)
        .with_target(foreign.id);
    let outcome = h.mediator.delete(&req).await.unwrap();
    assert!(outcome.denial_message().is_some());

    // Nothing was deleted and nothing was audited.
    assert!(h.storage.get(&books(), foreign.id).await.is_ok());
    assert!(h.audit.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_update_of_foreign_record_is_hard_error() {
    let h = harness();
    let me = PrincipalId::new();
    let foreign = seed_book(&h.storage, Some(PrincipalId::new())).await;

    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Update)
        .with_target(foreign.id);
    let err = h
        .mediator
        .update(&req, Default::default())
        .await
        .unwrap_err();
    assert_matches!(err, GateError::PermissionDenied { .. });
}

#[tokio::test]
async fn admin_can_update_own_and_unowned_records() {
    let h = harness();
    let me = PrincipalId::new();
    let own = seed_book(&h.storage, Some(me)).await;
    let unowned = seed_book(&h.storage, None).await;

    for record in [own, unowned] {
        let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Update)
            .with_target(record.id);
        let outcome = h.mediator.update(&req, Default::default()).await.unwrap();
        assert!(outcome.is_allowed());
    }
}

#[tokio::test]
async fn superuser_deletes_anything() {
    let h = harness();
    let root = RawIdentity::authenticated(PrincipalId::new()).as_superuser();
    let foreign = seed_book(&h.storage, Some(PrincipalId::new())).await;

    let req = request(root, RequestMethod::Post, ViewKind::Delete).with_target(foreign.id);
    let outcome = h.mediator.delete(&req).await.unwrap();
    assert_eq!(outcome.into_allowed(), Some(DeleteDisposition::Deleted));
    assert!(h.storage.get(&books(), foreign.id).await.is_err());
}

#[tokio::test]
async fn protected_delete_is_reported_not_errored() {
    let h = harness();
    let me = PrincipalId::new();
    let own = seed_book(&h.storage, Some(me)).await;
    h.storage.mark_protected(own.id).await;

    let req =
        request(admin_identity(me), RequestMethod::Post, ViewKind::Delete).with_target(own.id);
    let outcome = h.mediator.delete(&req).await.unwrap();
    assert_eq!(outcome.into_allowed(), Some(DeleteDisposition::Protected));
    assert!(h.storage.get(&books(), own.id).await.is_ok());
}

#[tokio::test]
async fn bulk_delete_mixed_ownership_denies_whole_batch() {
    let h = harness();
    let me = PrincipalId::new();
    let mine = seed_book(&h.storage, Some(me)).await;
    let theirs = seed_book(&h.storage, Some(PrincipalId::new())).await;

    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Delete);
    let outcome = h
        .mediator
        .bulk_delete(&req, &[mine.id, theirs.id])
        .await
        .unwrap();
    assert!(outcome.denial_message().is_some());

    // Zero deletions were performed.
    assert!(h.storage.get(&books(), mine.id).await.is_ok());
    assert!(h.storage.get(&books(), theirs.id).await.is_ok());
}

#[tokio::test]
async fn bulk_delete_counts_protected_targets_as_skipped() {
    let h = harness();
    let me = PrincipalId::new();
    let a = seed_book(&h.storage, Some(me)).await;
    let b = seed_book(&h.storage, None).await;
    let c = seed_book(&h.storage, Some(me)).await;
    h.storage.mark_protected(b.id).await;

    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Delete);
    let outcome = h
        .mediator
        .bulk_delete(&req, &[a.id, b.id, c.id])
        .await
        .unwrap();
    assert_matches!(
        outcome,
        Outcome::PartiallyCompleted {
            deleted: 2,
            skipped: 1
        }
    );
    assert!(h.storage.get(&books(), b.id).await.is_ok());
}

#[tokio::test]
async fn bulk_delete_clean_batch_reports_no_skips() {
    let h = harness();
    let me = PrincipalId::new();
    let a = seed_book(&h.storage, Some(me)).await;
    let b = seed_book(&h.storage, Some(me)).await;

    let req = request(admin_identity(me), RequestMethod::Post, ViewKind::Delete);
    let outcome = h.mediator.bulk_delete(&req, &[a.id, b.id]).await.unwrap();
    let report = outcome.into_allowed().unwrap();
    assert_eq!(report.deleted, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.total(), 2);
}

#[tokio::test]
async fn assign_unowned_is_superuser_only_and_idempotent() {
    let h = harness();
    let root_id = PrincipalId::new();
    let owner = PrincipalId::new();
    seed_book(&h.storage, None).await;
    seed_book(&h.storage, None).await;
    let owned = seed_book(&h.storage, Some(owner)).await;

    // Admins cannot run the backfill.
    let admin_req = request(
        admin_identity(PrincipalId::new()),
        RequestMethod::Post,
        ViewKind::List,
    );
    let err = h
        .mediator
        .assign_unowned(&admin_req, root_id)
        .await
        .unwrap_err();
    assert_matches!(err, GateError::PermissionDenied { .. });

    let root = RawIdentity::authenticated(root_id).as_superuser();
    let req = request(root.clone(), RequestMethod::Post, ViewKind::List);
    let stamped = h.mediator.assign_unowned(&req, root_id).await.unwrap();
    assert_eq!(stamped, 2);

    // Already-owned records keep their owner; a second run stamps nothing.
    let again = request(root, RequestMethod::Post, ViewKind::List);
    assert_eq!(h.mediator.assign_unowned(&again, root_id).await.unwrap(), 0);
    let kept = h.storage.get(&books(), owned.id).await.unwrap();
    assert_eq!(kept.created_by, Some(owner));
}

#[tokio::test]
async fn update_missing_target_is_invalid() {
    let h = harness();
    let req = request(
        admin_identity(PrincipalId::new()),
        RequestMethod::Post,
        ViewKind::Update,
    );
    let err = h
        .mediator
        .update(&req, Default::default())
        .await
        .unwrap_err();
    assert_matches!(err, GateError::Invalid { .. });
}
