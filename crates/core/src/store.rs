//! Record store abstraction and the in-memory implementation.
//!
//! The store is append-only: no update or delete is exposed. Appends are serialised behind a
//! single write lock; reads take the shared lock only long enough to clone `Arc` handles, so a
//! snapshot is stale-but-consistent and never observes a half-built record.
//!
//! A persistent backend only has to honour the same [`CaseStore`] contract; filtering,
//! pagination and aggregation operate on snapshots and are unaffected.

use crate::record::CaseRecord;
use crate::{CaseError, CaseResult};
use oncora_uuid::CaseId;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

pub trait CaseStore: Send + Sync {
    /// Point-in-time copy of every record, in insertion order.
    fn snapshot(&self) -> CaseResult<Vec<Arc<CaseRecord>>>;

    fn len(&self) -> CaseResult<usize>;

    fn is_empty(&self) -> CaseResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Appends a record atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::DuplicateCaseId`] if a record with the same id is already stored;
    /// the store is left unchanged.
    fn append(&self, record: CaseRecord) -> CaseResult<Arc<CaseRecord>>;
}

#[derive(Default)]
struct Inner {
    records: Vec<Arc<CaseRecord>>,
    ids: HashSet<CaseId>,
}

/// Process-local store backed by a `Vec` under an `RwLock`.
#[derive(Default)]
pub struct InMemoryCaseStore {
    inner: RwLock<Inner>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CaseError {
    CaseError::Internal("case store lock poisoned".into())
}

impl CaseStore for InMemoryCaseStore {
    fn snapshot(&self) -> CaseResult<Vec<Arc<CaseRecord>>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.clone())
    }

    fn len(&self) -> CaseResult<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.len())
    }

    fn append(&self, record: CaseRecord) -> CaseResult<Arc<CaseRecord>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if !inner.ids.insert(record.id) {
            return Err(CaseError::DuplicateCaseId(record.id.to_string()));
        }
        let record = Arc::new(record);
        inner.records.push(Arc::clone(&record));
        Ok(record)
    }
}
