use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("usage: {0}")]
    Usage(String),
    #[error("config error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to start command: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}
