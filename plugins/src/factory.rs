use gelf_tee_core::api::{AppConfig, LogSink, RunnerPlugin};

use crate::runner::ProcessRunnerPlugin;
use crate::sink::GelfUdpSink;

pub fn build_runner(_cfg: &AppConfig) -> Box<dyn RunnerPlugin> {
    Box::new(ProcessRunnerPlugin::new())
}

pub async fn build_sink(cfg: &AppConfig) -> Box<dyn LogSink> {
    let sink = GelfUdpSink::connect(&cfg.sink).await;
    tracing::debug!(addr = sink.target(), connected = sink.is_connected(), "gelf sink ready");
    Box::new(sink)
}

/// Value for the GELF `host` field: the configured override, else the local hostname.
pub fn source_host(cfg: &AppConfig) -> String {
    if let Some(h) = cfg.sink.source_host.as_deref().map(str::trim) {
        if !h.is_empty() {
            return h.to_string();
        }
    }
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().into_owned())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
