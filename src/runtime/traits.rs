//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::sheet::{SheetResult, SheetStore};
use crate::state_machine::CompletedRecord;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Sink for completed records — the persistence seam of the runtime.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Durably append one record. On failure the caller keeps the
    /// conversation state so the save can be retried.
    async fn append(&self, record: &CompletedRecord) -> SheetResult<()>;
}

#[async_trait]
impl<T: RecordSink + ?Sized> RecordSink for Arc<T> {
    async fn append(&self, record: &CompletedRecord) -> SheetResult<()> {
        (**self).append(record).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use `SheetStore` as a `RecordSink`.
///
/// The whole-document read-modify-write in `append_record` assumes a single
/// writer; the mutex makes that explicit, so appends stay serialized even if
/// event intake is parallelized later.
#[derive(Clone)]
pub struct SheetSink {
    store: Arc<Mutex<SheetStore>>,
}

impl SheetSink {
    pub fn new(store: SheetStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[async_trait]
impl RecordSink for SheetSink {
    async fn append(&self, record: &CompletedRecord) -> SheetResult<()> {
        let store = self.store.lock().unwrap();
        store.append_record(record)
    }
}
