//! In-memory storage implementation
//!
//! Backs tests and small deployments. Referential protection is modeled
//! explicitly: a record marked protected refuses deletion the way a
//! database would refuse to break a foreign key.

use crate::storage::{DeleteError, FieldMap, RecordDraft, RecordFilter, Storage};
use async_trait::async_trait;
use shelfgate_core::{EntityType, GateError, GateResult, Record, RecordId};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredRecord {
    record: Record,
    fields: FieldMap,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: BTreeMap<EntityType, BTreeMap<RecordId, StoredRecord>>,
    protected: BTreeSet<RecordId>,
}

/// In-process [`Storage`] implementation
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<MemoryInner>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing mediation (test setup)
    pub async fn seed(&self, record: Record) {
        let mut inner = self.inner.lock().await;
        inner
            .records
            .entry(record.entity_type.clone())
            .or_default()
            .insert(
                record.id,
                StoredRecord {
                    record,
                    fields: FieldMap::new(),
                },
            );
    }

    /// Mark a record as having dependents, so deletes are refused
    pub async fn mark_protected(&self, id: RecordId) {
        self.inner.lock().await.protected.insert(id);
    }

    /// The stored domain fields of a record, if present
    pub async fn fields_of(&self, entity_type: &EntityType, id: RecordId) -> Option<FieldMap> {
        let inner = self.inner.lock().await;
        inner
            .records
            .get(entity_type)
            .and_then(|bucket| bucket.get(&id))
            .map(|stored| stored.fields.clone())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, entity_type: &EntityType, id: RecordId) -> GateResult<Record> {
        let inner = self.inner.lock().await;
        inner
            .records
            .get(entity_type)
            .and_then(|bucket| bucket.get(&id))
            .map(|stored| stored.record.clone())
            .ok_or_else(|| GateError::not_found(format!("{entity_type} {id}")))
    }

    async fn query(
        &self,
        entity_type: &EntityType,
        filter: &RecordFilter,
    ) -> GateResult<Vec<Record>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .get(entity_type)
            .map(|bucket| {
                bucket
                    .values()
                    .map(|stored| &stored.record)
                    .filter(|record| filter.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, entity_type: &EntityType, draft: RecordDraft) -> GateResult<Record> {
        let mut record = Record::new(entity_type.clone(), RecordId::new());
        if let Some(owner) = draft.created_by {
            record.stamp_owner(owner);
        }
        let mut inner = self.inner.lock().await;
        inner.records.entry(entity_type.clone()).or_default().insert(
            record.id,
            StoredRecord {
                record: record.clone(),
                fields: draft.fields,
            },
        );
        Ok(record)
    }

    async fn update(&self, record: &Record, fields: FieldMap) -> GateResult<Record> {
        let mut inner = self.inner.lock().await;
        let stored = inner
            .records
            .get_mut(&record.entity_type)
            .and_then(|bucket| bucket.get_mut(&record.id))
            .ok_or_else(|| {
                GateError::not_found(format!("{} {}", record.entity_type, record.id))
            })?;
        stored.record = record.clone();
        stored.fields.extend(fields);
        Ok(stored.record.clone())
    }

    async fn delete(&self, record: &Record) -> Result<(), DeleteError> {
        let mut inner = self.inner.lock().await;
        if inner.protected.contains(&record.id) {
            return Err(DeleteError::Protected);
        }
        let removed = inner
            .records
            .get_mut(&record.entity_type)
            .and_then(|bucket| bucket.remove(&record.id));
        if removed.is_none() {
            return Err(DeleteError::Storage(GateError::not_found(format!(
                "{} {}",
                record.entity_type, record.id
            ))));
        }
        Ok(())
    }
}
