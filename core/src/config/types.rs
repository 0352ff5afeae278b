use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "gelf_tee_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

// The child's stderr is echoed on our stderr, keep diagnostics quiet unless asked.
fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Where and how GELF records are shipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default = "default_sink_host")]
    pub host: String,

    #[serde(default = "default_sink_port")]
    pub port: u16,

    /// Datagrams above this size are split into GELF chunks.
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// zlib-compress payloads before sending.
    #[serde(default = "default_compress")]
    pub compress: bool,

    /// Value for the GELF `host` field. Defaults to the local hostname.
    #[serde(default)]
    pub source_host: Option<String>,
}

fn default_sink_host() -> String {
    "localhost".to_string()
}

fn default_sink_port() -> u16 {
    12201
}

fn default_max_chunk_size() -> usize {
    1420
}

fn default_compress() -> bool {
    true
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            host: default_sink_host(),
            port: default_sink_port(),
            max_chunk_size: default_max_chunk_size(),
            compress: default_compress(),
            source_host: None,
        }
    }
}

impl SinkConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Send one record per output line instead of one record per stream.
    #[serde(default)]
    pub split: bool,

    #[serde(default = "default_line_channel_capacity")]
    pub line_channel_capacity: usize,
}

fn default_line_channel_capacity() -> usize {
    64
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            split: false,
            line_channel_capacity: default_line_channel_capacity(),
        }
    }
}
