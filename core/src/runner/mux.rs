//! Fan-in of the two per-stream line channels.
use tokio::sync::mpsc;

use crate::error::RunnerError;
use crate::record::{RecordFormatter, Severity};
use crate::sink::LogSink;

use super::io_pump::LineStream;
use super::types::OutputMode;

/// Lines held back for batch records, per stream, in arrival order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CapturedOutput {
    pub fn stdout_text(&self) -> String {
        self.stdout.join("\n")
    }

    pub fn stderr_text(&self) -> String {
        self.stderr.join("\n")
    }
}

pub struct Multiplexer<'a> {
    formatter: &'a RecordFormatter,
    sink: &'a dyn LogSink,
    mode: OutputMode,
}

impl<'a> Multiplexer<'a> {
    pub fn new(formatter: &'a RecordFormatter, sink: &'a dyn LogSink, mode: OutputMode) -> Self {
        Self {
            formatter,
            sink,
            mode,
        }
    }

    /// Drains both channels until each has been closed by its reader.
    ///
    /// `tokio::select!` picks randomly among ready branches, so neither stream
    /// can starve the other. Per-stream order is preserved; cross-stream order
    /// is whatever the scheduler produced.
    pub async fn run(
        &self,
        mut stdout_rx: mpsc::Receiver<String>,
        mut stderr_rx: mpsc::Receiver<String>,
    ) -> Result<CapturedOutput, RunnerError> {
        let mut captured = CapturedOutput::default();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_rx.recv(), if stdout_open => match line {
                    Some(line) => {
                        if self.mode.is_split() {
                            self.forward(LineStream::Stdout, &line).await?;
                        } else {
                            captured.stdout.push(line);
                        }
                    }
                    None => {
                        stdout_open = false;
                        tracing::debug!(stream = "stdout", "channel closed");
                    }
                },
                line = stderr_rx.recv(), if stderr_open => match line {
                    Some(line) => {
                        if self.mode.is_split() {
                            self.forward(LineStream::Stderr, &line).await?;
                        }
                        // Buffered in split mode too.
                        captured.stderr.push(line);
                    }
                    None => {
                        stderr_open = false;
                        tracing::debug!(stream = "stderr", "channel closed");
                    }
                },
            }
        }

        Ok(captured)
    }

    async fn forward(&self, stream: LineStream, line: &str) -> Result<(), RunnerError> {
        let severity = match stream {
            LineStream::Stdout => Severity::Informational,
            LineStream::Stderr => Severity::Warning,
        };
        let payload = self.formatter.split(line, severity, None)?;
        self.sink.send(&payload).await;
        Ok(())
    }
}
