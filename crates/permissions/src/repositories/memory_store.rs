use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::permission_store::{DocumentBackend, PermissionDocument};
use crate::types::{TagallError, TagallResult};

/// In-memory permission store for tests and embedding.
///
/// Holds the raw JSON document so malformed content can be simulated, and can
/// be told to fail reads or writes.
#[derive(Debug, Clone)]
pub struct InMemoryPermissionStore {
    document: Arc<RwLock<Option<Value>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryPermissionStore {
    /// Empty store; nothing written yet
    pub fn new() -> Self {
        Self {
            document: Arc::new(RwLock::new(None)),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Store pre-seeded with an arbitrary JSON document
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document))),
            ..Self::new()
        }
    }

    /// Current raw document, `None` if nothing was ever written
    pub async fn snapshot(&self) -> Option<Value> {
        self.document.read().await.clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryPermissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentBackend for InMemoryPermissionStore {
    async fn load(&self) -> TagallResult<PermissionDocument> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TagallError::store_unreadable("simulated read failure"));
        }

        match self.document.read().await.clone() {
            Some(value) => PermissionDocument::from_value(value),
            None => Ok(PermissionDocument::default()),
        }
    }

    async fn save(&self, document: &PermissionDocument) -> TagallResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TagallError::store_write_failed("simulated write failure"));
        }

        *self.document.write().await = Some(document.as_value());
        Ok(())
    }
}
