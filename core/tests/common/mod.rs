#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gelf_tee_core::api::{ChildExit, LogRecord, RunnerPlugin, RunnerSession, RunnerStartArgs};
use tokio::io::{AsyncRead, AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

/// One write the fake child performs, in order.
#[derive(Debug, Clone)]
pub enum Write {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
}

pub fn out(s: &str) -> Write {
    Write::Stdout(s.as_bytes().to_vec())
}

pub fn err(s: &str) -> Write {
    Write::Stderr(s.as_bytes().to_vec())
}

/// Plays back a fixed script of writes instead of launching a process.
#[derive(Debug, Clone)]
pub struct ScriptedPlugin {
    pub writes: Vec<Write>,
    pub success: bool,
    pub start_error: Option<String>,
    /// Capacity of each fake pipe.
    pub pipe_capacity: usize,
    /// Start a session whose stderr handle is already gone.
    pub without_stderr: bool,
    /// Set once the session has been killed.
    pub killed: Arc<AtomicBool>,
}

impl ScriptedPlugin {
    pub fn new(writes: Vec<Write>, success: bool) -> Self {
        Self {
            writes,
            success,
            start_error: None,
            pipe_capacity: 4096,
            without_stderr: false,
            killed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing_to_start(reason: &str) -> Self {
        Self {
            writes: vec![],
            success: false,
            start_error: Some(reason.to_string()),
            pipe_capacity: 4096,
            without_stderr: false,
            killed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn was_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunnerPlugin for ScriptedPlugin {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start_session(
        &self,
        _args: &RunnerStartArgs,
    ) -> anyhow::Result<Box<dyn RunnerSession>> {
        if let Some(reason) = &self.start_error {
            anyhow::bail!("{reason}");
        }

        let (stdout_rd, mut stdout_wr) = tokio::io::duplex(self.pipe_capacity);
        let (stderr_rd, mut stderr_wr) = tokio::io::duplex(self.pipe_capacity);
        let writes = self.writes.clone();

        let handle = tokio::spawn(async move {
            for w in writes {
                match w {
                    Write::Stdout(b) => stdout_wr.write_all(&b).await?,
                    Write::Stderr(b) => stderr_wr.write_all(&b).await?,
                }
            }
            Ok::<(), std::io::Error>(())
        });

        Ok(Box::new(ScriptedSession {
            stdout: Some(stdout_rd),
            stderr: (!self.without_stderr).then_some(stderr_rd),
            handle: Some(handle),
            success: self.success,
            killed: self.killed.clone(),
        }))
    }
}

struct ScriptedSession {
    stdout: Option<DuplexStream>,
    stderr: Option<DuplexStream>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
    success: bool,
    killed: Arc<AtomicBool>,
}

#[async_trait]
impl RunnerSession for ScriptedSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> anyhow::Result<ChildExit> {
        if let Some(h) = self.handle.take() {
            h.await??;
        }
        Ok(ChildExit {
            success: self.success,
            code: Some(if self.success { 0 } else { 3 }),
        })
    }

    async fn kill(&mut self) -> anyhow::Result<()> {
        if let Some(h) = self.handle.take() {
            h.abort();
        }
        self.killed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn short_messages(records: &[LogRecord]) -> Vec<&str> {
    records.iter().map(|r| r.short_message.as_str()).collect()
}

pub fn content_records(records: &[LogRecord]) -> Vec<&LogRecord> {
    records.iter().filter(|r| r.failed.is_none()).collect()
}

pub fn lifecycle_records(records: &[LogRecord]) -> Vec<&LogRecord> {
    records.iter().filter(|r| r.failed.is_some()).collect()
}
