// ABOUTME: Top-level error type for session construction

use thiserror::Error;

use crate::layout::ValidationError;
use crate::tmux::TmuxError;

/// Top level error for building sessions in tmux.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid layout: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Tmux(#[from] TmuxError),

    #[error("session with name {0:?} already exists: rename the session or attach to it")]
    NamingConflict(String),
}
