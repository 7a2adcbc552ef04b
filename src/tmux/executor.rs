// ABOUTME: Process-level execution of tmux invocations
// The TmuxExecutor trait is the seam between the session engines and the tmux binary

use std::process::Command;

use tracing::debug;

use crate::tmux::env::{TmuxEnvironment, TMUX_ENV};
use crate::tmux::error::TmuxError;

/// Runs one tmux invocation and returns its trimmed output.
#[cfg_attr(test, mockall::automock)]
pub trait TmuxExecutor {
    fn run(&self, args: &[String]) -> Result<String, TmuxError>;
}

/// Executor backed by a real tmux binary.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    binary: String,
    extra_args: Vec<String>,
    strip_session_var: bool,
}

impl ProcessExecutor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
            strip_session_var: false,
        }
    }

    /// Arguments prepended to every invocation, e.g. `-L other-socket`.
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Child processes started from inside a tmux client must not inherit
    /// `TMUX`, otherwise tmux resolves targets against the calling session.
    pub fn with_environment(mut self, env: &TmuxEnvironment) -> Self {
        self.strip_session_var = env.is_inside_tmux();
        self
    }
}

impl TmuxExecutor for ProcessExecutor {
    fn run(&self, args: &[String]) -> Result<String, TmuxError> {
        let full_args: Vec<String> = self.extra_args.iter().chain(args).cloned().collect();
        debug!("exec: {} {}", self.binary, full_args.join(" "));

        let mut cmd = Command::new(&self.binary);
        cmd.args(&full_args);
        if self.strip_session_var {
            cmd.env_remove(TMUX_ENV);
        }

        let output = cmd
            .output()
            .map_err(|e| TmuxError::execution(&self.binary, &full_args, e.to_string(), ""))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim_end().to_string();

        if !output.status.success() {
            return Err(TmuxError::execution(
                &self.binary,
                &full_args,
                output.status.to_string(),
                combined,
            ));
        }

        Ok(combined)
    }
}
