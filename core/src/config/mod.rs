mod load;
mod types;

pub use load::load;
pub use types::{AppConfig, LoggingConfig, RunnerConfig, SinkConfig};
