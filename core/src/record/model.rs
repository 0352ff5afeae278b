use serde::{Deserialize, Serialize};

pub const GELF_VERSION: &str = "1.1";

/// Syslog severity carried in the GELF `level` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Informational,
}

impl Severity {
    pub fn level(self) -> u8 {
        match self {
            Severity::Warning => 4,
            Severity::Informational => 6,
        }
    }

    /// Label used as `short_message` for a batched stream record.
    pub fn batch_label(self) -> &'static str {
        match self {
            Severity::Warning => "Standard Error Output",
            Severity::Informational => "Standard Output",
        }
    }
}

/// One GELF message as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub version: String,
    pub host: String,
    pub short_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub level: u8,
    #[serde(rename = "_pid", default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(rename = "_command")]
    pub command: String,
    /// Only lifecycle records (start/finish) carry this flag.
    #[serde(rename = "_failed", default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u8>,
}
