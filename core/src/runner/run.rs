use tokio::sync::mpsc;

use crate::error::RunnerError;
use crate::record::{RecordFormatter, Severity};
use crate::sink::LogSink;

use super::io_pump;
use super::mux::Multiplexer;
use super::traits::{RunnerPlugin, RunnerSession};
use super::types::{OutputMode, RunOutcome, RunnerStartArgs};

pub struct RunTeeArgs<'a> {
    pub plugin: &'a dyn RunnerPlugin,
    pub start: &'a RunnerStartArgs,
    pub sink: &'a dyn LogSink,
    /// GELF `host` field.
    pub host: &'a str,
    pub mode: OutputMode,
    pub line_channel_capacity: usize,
    /// Suppress local echo of the child's output.
    pub silent: bool,
}

/// Runs the child to completion, relaying its output to `sink`.
///
/// Returns `Err` only when the child could not be started or a record could
/// not be encoded. A child that exits unsuccessfully is an `Ok` outcome with
/// `success == false`.
#[tracing::instrument(
    name = "runner.run_tee",
    skip(args),
    fields(plugin = args.plugin.name(), sink = args.sink.name())
)]
pub async fn run_tee(args: RunTeeArgs<'_>) -> Result<RunOutcome, RunnerError> {
    let RunTeeArgs {
        plugin,
        start,
        sink,
        host,
        mode,
        line_channel_capacity,
        silent,
    } = args;

    let command_line = start.command_line();
    let formatter = RecordFormatter::new(command_line.clone(), host);

    let mut session = match plugin.start_session(start).await {
        Ok(session) => session,
        Err(e) => return Err(start_failed(&formatter, sink, e.to_string()).await),
    };
    let (stdout, stderr) = match take_streams(&mut *session) {
        Ok(streams) => streams,
        Err(reason) => {
            if let Err(e) = session.kill().await {
                tracing::warn!(error = %e, "failed to kill child without output pipes");
            }
            return Err(start_failed(&formatter, sink, reason).await);
        }
    };
    tracing::debug!(phase = "running", "lifecycle");

    let started = formatter.split(
        &format!("Started command: {command_line}"),
        Severity::Informational,
        Some(false),
    )?;
    sink.send(&started).await;

    let capacity = line_channel_capacity.max(1);
    let (out_tx, out_rx) = mpsc::channel::<String>(capacity);
    let (err_tx, err_rx) = mpsc::channel::<String>(capacity);
    let out_task = io_pump::pump_stdout(stdout, out_tx, silent);
    let err_task = io_pump::pump_stderr(stderr, err_tx, silent);

    let captured = Multiplexer::new(&formatter, sink, mode)
        .run(out_rx, err_rx)
        .await?;
    tracing::debug!(phase = "draining", "lifecycle");

    out_task.await.ok();
    err_task.await.ok();

    let success = match session.wait().await {
        Ok(exit) => {
            tracing::info!(success = exit.success, code = ?exit.code, "child exited");
            exit.success
        }
        Err(e) => {
            tracing::warn!(error = %e, "wait failed, reporting command as failed");
            false
        }
    };
    tracing::debug!(phase = "exited", "lifecycle");

    if !mode.is_split() {
        let batches = [
            (captured.stdout_text(), Severity::Informational),
            (captured.stderr_text(), Severity::Warning),
        ];
        for (text, severity) in batches {
            if let Some(payload) = formatter.batch(&text, severity)? {
                sink.send(&payload).await;
            }
        }
    }

    let (message, severity) = if success {
        ("Command succeeded", Severity::Informational)
    } else {
        ("Command failed", Severity::Warning)
    };
    let finished = formatter.split(message, severity, Some(!success))?;
    sink.send(&finished).await;

    Ok(RunOutcome::from_success(success))
}

type Streams = (
    Box<dyn tokio::io::AsyncRead + Unpin + Send>,
    Box<dyn tokio::io::AsyncRead + Unpin + Send>,
);

fn take_streams(session: &mut dyn RunnerSession) -> Result<Streams, String> {
    let stdout = session.stdout().ok_or_else(|| "no stdout pipe".to_string())?;
    let stderr = session.stderr().ok_or_else(|| "no stderr pipe".to_string())?;
    Ok((stdout, stderr))
}

/// Best-effort notice to the collector, then the fatal error for the caller.
async fn start_failed(
    formatter: &RecordFormatter,
    sink: &dyn LogSink,
    reason: String,
) -> RunnerError {
    let message = format!("Failed to start command: {reason}");
    tracing::error!(command = formatter.command(), %reason, "start failed");
    match formatter.split(&message, Severity::Warning, Some(true)) {
        Ok(payload) => sink.send(&payload).await,
        Err(e) => return e,
    }
    RunnerError::Spawn(reason)
}
