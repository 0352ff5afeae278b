use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::types::{ChildExit, RunnerStartArgs};

/// A started child. Each output handle can be taken once.
#[async_trait]
pub trait RunnerSession: Send {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    async fn wait(&mut self) -> anyhow::Result<ChildExit>;
    /// Terminates the child and reaps it. Used when a session cannot be driven.
    async fn kill(&mut self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &RunnerStartArgs)
        -> anyhow::Result<Box<dyn RunnerSession>>;
}
