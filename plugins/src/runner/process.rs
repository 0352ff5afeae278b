use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use gelf_tee_core::api::{ChildExit, RunnerPlugin, RunnerSession, RunnerStartArgs};
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

/// Launches the command as an OS process: stdin inherited, stdout and stderr piped.
pub struct ProcessRunnerPlugin {}

impl ProcessRunnerPlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProcessRunnerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunnerPlugin for ProcessRunnerPlugin {
    fn name(&self) -> &str {
        "process"
    }

    async fn start_session(&self, args: &RunnerStartArgs) -> Result<Box<dyn RunnerSession>> {
        let child = Command::new(&args.cmd)
            .args(&args.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        tracing::debug!(pid = ?child.id(), cmd = %args.cmd, "child spawned");
        Ok(Box::new(ProcessRunnerSession { child }))
    }
}

struct ProcessRunnerSession {
    child: Child,
}

#[async_trait]
impl RunnerSession for ProcessRunnerSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> Result<ChildExit> {
        let status = self.child.wait().await.context("waiting for child")?;
        Ok(ChildExit {
            success: status.success(),
            code: status.code(),
        })
    }

    async fn kill(&mut self) -> Result<()> {
        self.child.kill().await.context("killing child")
    }
}
