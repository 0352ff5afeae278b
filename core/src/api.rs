//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `gelf_tee_core::api` instead of reaching into internal modules.

pub use crate::config::{load, AppConfig, LoggingConfig, RunnerConfig, SinkConfig};
pub use crate::error::{CliError, RunnerError};
pub use crate::record::{LogRecord, RecordFormatter, Severity, GELF_VERSION};
pub use crate::runner::{
    run_tee, CapturedOutput, ChildExit, OutputMode, RunOutcome, RunTeeArgs, RunnerPlugin,
    RunnerSession, RunnerStartArgs,
};
pub use crate::sink::{LogSink, MemorySink};
