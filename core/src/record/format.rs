use crate::error::RunnerError;

use super::model::{LogRecord, Severity, GELF_VERSION};

/// Builds GELF payloads for one wrapped command.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    command: String,
    host: String,
}

impl RecordFormatter {
    pub fn new(command: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            host: host.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// One record per line or lifecycle event. Never empty.
    pub fn split(
        &self,
        line: &str,
        severity: Severity,
        failed: Option<bool>,
    ) -> Result<Vec<u8>, RunnerError> {
        let record = self.record(line.to_string(), None, severity, failed);
        Ok(serde_json::to_vec(&record)?)
    }

    /// One record for a whole stream. `None` when there is nothing to send.
    pub fn batch(&self, output: &str, severity: Severity) -> Result<Option<Vec<u8>>, RunnerError> {
        if output.is_empty() {
            return Ok(None);
        }
        let record = self.record(
            severity.batch_label().to_string(),
            Some(output.to_string()),
            severity,
            None,
        );
        Ok(Some(serde_json::to_vec(&record)?))
    }

    fn record(
        &self,
        short_message: String,
        full_message: Option<String>,
        severity: Severity,
        failed: Option<bool>,
    ) -> LogRecord {
        LogRecord {
            version: GELF_VERSION.to_string(),
            host: self.host.clone(),
            short_message,
            full_message,
            timestamp: Some(now_seconds()),
            level: severity.level(),
            pid: None,
            command: self.command.clone(),
            failed: failed.map(u8::from),
        }
    }
}

fn now_seconds() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1000.0
}
