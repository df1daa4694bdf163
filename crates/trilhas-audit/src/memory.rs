use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::record::AuditRecord;
use crate::sink::{AuditSink, AuditSinkError};

/// Collects records in memory. Can be switched into a failing mode to
/// exercise sink-outage paths.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
    failing: AtomicBool,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every append.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditSinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuditSinkError::Unavailable("sink disabled".to_string()));
        }
        self.records
            .lock()
            .map_err(|e| AuditSinkError::Unavailable(e.to_string()))?
            .push(record);
        Ok(())
    }
}
