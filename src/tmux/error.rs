// ABOUTME: Error types for tmux command execution
// Defines error conditions that can occur when talking to a tmux server

use thiserror::Error;

/// Failures talking to the tmux server or reading its output.
#[derive(Debug, Error)]
pub enum TmuxError {
    /// A tmux invocation failed to spawn or exited non-zero. Carries the full
    /// invocation so callers never need to add context of their own.
    #[error("failed to execute {binary} {}: {message}\n{output}", .args.join(" "))]
    Execution {
        binary: String,
        args: Vec<String>,
        message: String,
        output: String,
    },

    #[error("malformed {kind} row {row:?}: expected {expected} fields, found {found}")]
    MalformedRow {
        kind: &'static str,
        row: String,
        expected: usize,
        found: usize,
    },
}

impl TmuxError {
    pub fn execution(
        binary: impl Into<String>,
        args: &[String],
        message: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::Execution {
            binary: binary.into(),
            args: args.to_vec(),
            message: message.into(),
            output: output.into(),
        }
    }
}
