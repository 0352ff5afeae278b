use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::record::LogRecord;

/// Best-effort transport for formatted records.
///
/// Implementations absorb every delivery failure; callers never learn whether
/// a payload arrived.
#[async_trait]
pub trait LogSink: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, payload: &[u8]);
}

/// Keeps every payload in memory, in send order.
#[derive(Clone, Default)]
pub struct MemorySink {
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Payloads decoded back into records; undecodable payloads are skipped.
    pub fn records(&self) -> Vec<LogRecord> {
        self.payloads()
            .iter()
            .filter_map(|p| serde_json::from_slice(p).ok())
            .collect()
    }
}

#[async_trait]
impl LogSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, payload: &[u8]) {
        if let Ok(mut g) = self.payloads.lock() {
            g.push(payload.to_vec());
        }
    }
}
