//! Stream readers: split one child stream into lines, echo them locally and
//! hand each line to the multiplexer over the stream's own channel.
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStream {
    Stdout,
    Stderr,
}

impl LineStream {
    pub fn label(self) -> &'static str {
        match self {
            LineStream::Stdout => "stdout",
            LineStream::Stderr => "stderr",
        }
    }
}

pub fn pump_stdout<R>(rd: R, line_tx: mpsc::Sender<String>, silent: bool) -> JoinHandle<u64>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let echo = (!silent).then(tokio::io::stdout);
    tokio::spawn(pump(rd, echo, LineStream::Stdout, line_tx))
}

pub fn pump_stderr<R>(rd: R, line_tx: mpsc::Sender<String>, silent: bool) -> JoinHandle<u64>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let echo = (!silent).then(tokio::io::stderr);
    tokio::spawn(pump(rd, echo, LineStream::Stderr, line_tx))
}

/// Runs until `rd` is exhausted or the receiver goes away. Dropping `line_tx`
/// on return is what tells the multiplexer the stream is closed.
///
/// Returns the number of lines published.
pub(crate) async fn pump<R, W>(
    mut rd: R,
    mut echo: Option<W>,
    stream: LineStream,
    line_tx: mpsc::Sender<String>,
) -> u64
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; 16 * 1024];
    let mut line_buf: Vec<u8> = Vec::with_capacity(8 * 1024);
    let mut published = 0u64;

    loop {
        let n = match rd.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                let err = RunnerError::StreamIo {
                    stream: stream.label(),
                    source: e,
                };
                tracing::warn!(error = %err, "read failed, treating as end of stream");
                break;
            }
        };

        line_buf.extend_from_slice(&buf[..n]);
        while let Some(pos) = line_buf.iter().position(|&b| b == b'\n') {
            let mut one = line_buf.drain(..=pos).collect::<Vec<u8>>();
            trim_newline(&mut one);
            let line = String::from_utf8_lossy(&one).into_owned();
            if !publish(&mut echo, stream, &line_tx, line).await {
                return published;
            }
            published += 1;
        }
    }

    // EOF flush: deliver the last partial line if it doesn't end with '\n'.
    trim_newline(&mut line_buf);
    if !line_buf.is_empty() {
        let line = String::from_utf8_lossy(&line_buf).into_owned();
        if publish(&mut echo, stream, &line_tx, line).await {
            published += 1;
        }
    }

    tracing::debug!(stream = stream.label(), lines = published, "stream exhausted");
    published
}

async fn publish<W>(
    echo: &mut Option<W>,
    stream: LineStream,
    line_tx: &mpsc::Sender<String>,
    line: String,
) -> bool
where
    W: AsyncWrite + Unpin,
{
    if let Some(wr) = echo.as_mut() {
        if let Err(e) = write_line(wr, &line).await {
            // Keep forwarding to the collector even if the local terminal is gone.
            tracing::warn!(stream = stream.label(), error = %e, "local echo failed, disabling");
            *echo = None;
        }
    }

    if line_tx.send(line).await.is_err() {
        tracing::debug!(stream = stream.label(), "line receiver dropped");
        return false;
    }
    true
}

async fn write_line<W>(wr: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    wr.write_all(line.as_bytes()).await?;
    wr.write_all(b"\n").await?;
    wr.flush().await
}

fn trim_newline(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}
