//! GELF record model and payload formatting.
mod format;
mod model;

pub use format::RecordFormatter;
pub use model::{LogRecord, Severity, GELF_VERSION};
