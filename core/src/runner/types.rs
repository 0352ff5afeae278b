/// What to launch. The command line reported in records is `cmd` and `args` joined by spaces.
#[derive(Debug, Clone)]
pub struct RunnerStartArgs {
    pub cmd: String,
    pub args: Vec<String>,
}

impl RunnerStartArgs {
    pub fn new(cmd: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args,
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.cmd.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a session ended, as reported by its runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    pub success: bool,
    /// Raw exit code when the platform reports one. Diagnostics only.
    pub code: Option<i32>,
}

/// Outcome of a wrapped run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub exit_code: i32,
}

impl RunOutcome {
    pub fn from_success(success: bool) -> Self {
        Self {
            success,
            exit_code: if success { 0 } else { 1 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One record per stream, sent after the child exits.
    #[default]
    Batch,
    /// One record per line, sent as lines arrive.
    Split,
}

impl OutputMode {
    pub fn from_split_flag(split: bool) -> Self {
        if split {
            OutputMode::Split
        } else {
            OutputMode::Batch
        }
    }

    pub fn is_split(self) -> bool {
        matches!(self, OutputMode::Split)
    }
}
