//! Audit store trait and the in-memory implementation

use crate::entry::{AuditEntry, NewAuditEntry};
use async_trait::async_trait;
use shelfgate_core::{AuditEntryId, GateError, GateResult};
use std::sync::atomic::{AtomicBool, Ordering};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Append-only storage for audit entries
///
/// Implementations expose exactly two operations: append and read-back.
/// There is deliberately no way to update or delete an entry.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append a new entry, assigning its id and timestamp.
    async fn append(&self, entry: NewAuditEntry) -> GateResult<AuditEntryId>;

    /// All entries, newest first (timestamp descending, id as tiebreak).
    async fn entries(&self) -> GateResult<Vec<AuditEntry>>;
}

/// In-process audit store
///
/// Assigns monotonic ids starting at 1. The failure toggle lets tests
/// simulate an unreachable store to exercise the recorder's fire-and-forget
/// contract.
pub struct MemoryAuditStore {
    inner: Mutex<Vec<AuditEntry>>,
    next_id: Mutex<AuditEntryId>,
    fail_appends: AtomicBool,
}

impl MemoryAuditStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
            next_id: Mutex::new(AuditEntryId::new(1)),
            fail_appends: AtomicBool::new(false),
        }
    }

    /// Make every subsequent append fail with a storage error
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryAuditStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, entry: NewAuditEntry) -> GateResult<AuditEntryId> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(GateError::storage("audit store unavailable"));
        }
        let mut next_id = self.next_id.lock().await;
        let id = *next_id;
        *next_id = next_id.next();
        let full = AuditEntry {
            id,
            actor: entry.actor,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            timestamp: OffsetDateTime::now_utc(),
            details: entry.details,
        };
        self.inner.lock().await.push(full);
        Ok(id)
    }

    async fn entries(&self) -> GateResult<Vec<AuditEntry>> {
        let mut entries = self.inner.lock().await.clone();
        entries.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AuditAction;
    use shelfgate_core::{EntityType, PrincipalId};

    fn entry(action: AuditAction, entity_id: &str) -> NewAuditEntry {
        NewAuditEntry {
            actor: PrincipalId::new(),
            action,
            entity_type: EntityType::new("Book"),
            entity_id: entity_id.to_string(),
            details: String::new(),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_monotonic_ids() {
        let store = MemoryAuditStore::new();
        let first = store.append(entry(AuditAction::Read, "1")).await.unwrap();
        let second = store.append(entry(AuditAction::Update, "2")).await.unwrap();
        assert!(second > first);
        assert_eq!(first, AuditEntryId::new(1));
    }

    #[tokio::test]
    async fn test_entries_are_newest_first() {
        let store = MemoryAuditStore::new();
        store.append(entry(AuditAction::Read, "a")).await.unwrap();
        store.append(entry(AuditAction::Update, "b")).await.unwrap();
        store.append(entry(AuditAction::Login, "c")).await.unwrap();

        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 3);
        let ids: Vec<_> = entries.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
        assert!(entries[0].timestamp >= entries[2].timestamp);
    }

    #[tokio::test]
    async fn test_failure_toggle() {
        let store = MemoryAuditStore::new();
        store.set_fail_appends(true);
        assert!(store.append(entry(AuditAction::Read, "x")).await.is_err());
        store.set_fail_appends(false);
        assert!(store.append(entry(AuditAction::Read, "x")).await.is_ok());
        // The failed append consumed no id.
        assert_eq!(
            store.entries().await.unwrap()[0].id,
            AuditEntryId::new(1)
        );
    }
}
